use agentmesh::cli::{Cli, Commands};
use clap::Parser;

#[test]
fn test_parse_run() {
    let cli = Cli::try_parse_from(["agentmesh", "run", "Plan a 3-day trip to Tokyo"]).unwrap();

    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.mission, "Plan a 3-day trip to Tokyo");
            assert!(!args.report);
        }
        _ => panic!("Wrong top-level command"),
    }
    assert!(!cli.json);
}

#[test]
fn test_parse_run_with_report_and_json() {
    let cli = Cli::try_parse_from(["agentmesh", "run", "Tidy up", "--report", "--json"]).unwrap();

    match cli.command {
        Commands::Run(args) => assert!(args.report),
        _ => panic!("Wrong top-level command"),
    }
    assert!(cli.json);
}

#[test]
fn test_json_flag_is_global() {
    let cli = Cli::try_parse_from(["agentmesh", "--json", "agents"]).unwrap();
    assert!(matches!(cli.command, Commands::Agents));
    assert!(cli.json);

    let cli = Cli::try_parse_from(["agentmesh", "config", "-j"]).unwrap();
    assert!(matches!(cli.command, Commands::Config));
    assert!(cli.json);
}

#[test]
fn test_run_requires_mission() {
    assert!(Cli::try_parse_from(["agentmesh", "run"]).is_err());
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["agentmesh", "swarm"]).is_err());
}

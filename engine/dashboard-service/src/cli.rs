//! # Command Line Interface
//!
//! Builds a team dashboard or an efficiency drilldown and prints it as JSON.

use crate::service::DashboardService;
use crate::types::{parse_home_filter, TeamId};
use anyhow::Result;
use clap::{Parser, Subcommand};
use scout_engine::DrilldownKind;
use std::path::PathBuf;

/// Scout dashboard CLI
#[derive(Parser, Debug)]
#[command(name = "scout-dashboard")]
#[command(about = "Season analytics for imported fantasy football teams")]
pub struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory with the imported JSON files (overrides configuration)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full dashboard of a team
    Dashboard {
        /// Team id (positive integer)
        #[arg(long)]
        team_id: String,

        /// Restrict pick metrics to home (true) or away (false) matches
        #[arg(long)]
        is_home: Option<String>,
    },
    /// Picks behind one row of an efficiency table
    Drilldown {
        /// Team id (positive integer)
        #[arg(long)]
        team_id: String,

        /// Table to expand: offense or defense
        #[arg(long)]
        kind: String,

        /// Position code (ATA, MEI, LAT, ZAG, GOL or TOT)
        #[arg(long)]
        pos: String,

        /// Restrict picks to home (true) or away (false) matches
        #[arg(long)]
        is_home: Option<String>,
    },
}

/// CLI handler
pub struct CliHandler {
    service: DashboardService,
}

impl CliHandler {
    pub fn new(service: DashboardService) -> Self {
        Self { service }
    }

    /// Run a command and return its pretty JSON output
    pub async fn handle_command(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Dashboard { team_id, is_home } => {
                let team_id = TeamId::parse(&team_id)?;
                let filter = parse_home_filter(is_home.as_deref())?;
                let dashboard = self.service.build_dashboard(team_id, filter).await?;
                Ok(serde_json::to_string_pretty(&dashboard)?)
            }
            Commands::Drilldown { team_id, kind, pos, is_home } => {
                let team_id = TeamId::parse(&team_id)?;
                let kind = DrilldownKind::parse(&kind)?;
                let filter = parse_home_filter(is_home.as_deref())?;
                let drilldown = self.service.drilldown(team_id, kind, &pos, filter).await?;
                Ok(serde_json::to_string_pretty(&drilldown)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::InMemoryStore;
    use scout_engine::EngineConfig;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn create_test_handler() -> CliHandler {
        let store = InMemoryStore::from_rows(
            &[json!({"team_id": 5, "name": "Tricolor"})],
            &[json!({"id": 50, "team_id": 5, "round": 1, "points": 61.5, "patrimonio": 102.3})],
            &[json!({
                "team_round_id": 50,
                "atleta_id": 9,
                "apelido": "Calleri",
                "posicao_id": 5,
                "clube_id": 276,
                "pontos_num": 9.2,
                "is_home": true,
                "scout": {"G": 1, "FD": 1}
            })],
            &[json!({"id": 276, "nome": "São Paulo", "escudo_png": "spfc.png"})],
        );
        let service = DashboardService::new(EngineConfig::default(), Arc::new(store)).unwrap();
        CliHandler::new(service)
    }

    #[test]
    fn test_parse_dashboard_command() {
        let cli = Cli::try_parse_from([
            "scout-dashboard",
            "--data-dir",
            "/tmp/data",
            "dashboard",
            "--team-id",
            "5",
            "--is-home",
            "false",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/data")));
        match cli.command {
            Commands::Dashboard { team_id, is_home } => {
                assert_eq!(team_id, "5");
                assert_eq!(is_home.as_deref(), Some("false"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_drilldown_requires_kind_and_pos() {
        assert!(Cli::try_parse_from(["scout-dashboard", "drilldown", "--team-id", "5"]).is_err());
    }

    #[tokio::test]
    async fn test_dashboard_output_is_json() {
        let handler = create_test_handler();
        let output = handler
            .handle_command(Commands::Dashboard { team_id: "5".to_string(), is_home: None })
            .await
            .unwrap();

        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["team"]["name"], "Tricolor");
        assert_eq!(value["totals"]["points_total"], 61.5);
        assert_eq!(value["series"]["points"].as_array().unwrap().len(), 38);
        assert_eq!(value["metrics"]["star_players"][4]["badge_url"], "spfc.png");
    }

    #[tokio::test]
    async fn test_drilldown_output_is_json() {
        let handler = create_test_handler();
        let output = handler
            .handle_command(Commands::Drilldown {
                team_id: "5".to_string(),
                kind: "offense".to_string(),
                pos: "ata".to_string(),
                is_home: Some("true".to_string()),
            })
            .await
            .unwrap();

        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["pos"], "ATA");
        assert_eq!(value["rows"][0]["club_name"], "São Paulo");
        assert_eq!(value["rows"][0]["ok"], true);
    }

    #[tokio::test]
    async fn test_invalid_team_id_rejected() {
        let handler = create_test_handler();
        let result = handler
            .handle_command(Commands::Dashboard { team_id: "0".to_string(), is_home: None })
            .await;
        assert!(result.is_err());
    }
}

// File: hostvoucher-server/src/commands/mod.rs

use std::sync::Arc;
use hostvoucher_common::traits::api::GamificationApi;

mod activation;
mod award;
mod badge;

const HELP: &str = "\
Commands:
  help
  status [json]
  activate [email]
  deactivate
  award <click|share|visit> <subject>
  badge <list [tier]|owned|buy <name>|grant <name>>
  quit
";

/// Runs one console line. Returns `(quit, output)`.
pub async fn dispatch(line: &str, api: &Arc<dyn GamificationApi>) -> (bool, Option<String>) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let cmd = parts.first().map(|c| c.to_lowercase()).unwrap_or_default();
    let args = parts.get(1..).unwrap_or(&[]);

    match cmd.as_str() {
        "" => (false, None),
        "help" => (false, Some(HELP.to_string())),
        "status" => (false, Some(activation::status(args, api).await)),
        "activate" => (false, Some(activation::handle_activate_command(args, api).await)),
        "deactivate" => (false, Some(activation::handle_deactivate_command(api).await)),
        "award" => (false, Some(award::handle_award_command(args, api).await)),
        "badge" => (false, Some(badge::handle_badge_command(args, api).await)),
        "quit" | "exit" => (true, Some("Shutting down...".to_string())),
        other => (false, Some(format!("Unknown command '{}'. Type 'help' for usage.", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostvoucher_core::config::GamificationConfig;
    use hostvoucher_core::services::NoopActivityReporter;
    use hostvoucher_core::test_utils::helpers::build_test_store;
    use hostvoucher_core::GamificationEngine;

    pub(crate) async fn test_api() -> Arc<dyn GamificationApi> {
        let (store, _clock, _repo) = build_test_store(0).await;
        let engine = GamificationEngine::with_reporter(
            store,
            &GamificationConfig::default(),
            Arc::new(NoopActivityReporter),
        );
        Arc::new(engine)
    }

    #[tokio::test]
    async fn test_quit_and_unknown() {
        let api = test_api().await;
        let (quit, _) = dispatch("quit", &api).await;
        assert!(quit);
        let (quit, out) = dispatch("frobnicate now", &api).await;
        assert!(!quit);
        assert!(out.unwrap().contains("Unknown command 'frobnicate'"));
    }

    #[tokio::test]
    async fn test_console_session_flow() {
        let api = test_api().await;

        let (_, out) = dispatch("award click productA", &api).await;
        assert!(out.unwrap().contains("not activated"));

        let (_, out) = dispatch("activate me@example.com", &api).await;
        assert!(out.unwrap().contains("activated"));

        let (_, out) = dispatch("award click productA", &api).await;
        assert!(out.unwrap().contains("+1000"));

        let (_, out) = dispatch("award click productA", &api).await;
        assert!(out.unwrap().contains("cooling down"));

        let (_, out) = dispatch("status", &api).await;
        let out = out.unwrap();
        assert!(out.contains("points=1000"));
        assert!(out.contains("me@example.com"));

        let (_, out) = dispatch("status json", &api).await;
        let json: serde_json::Value = serde_json::from_str(&out.unwrap()).unwrap();
        assert_eq!(json["state"]["points"], 1000);
    }

    #[tokio::test]
    async fn test_badge_commands() {
        let api = test_api().await;
        dispatch("activate", &api).await;

        let (_, out) = dispatch("badge grant verified buyer", &api).await;
        assert!(out.unwrap().contains("Verified Buyer"));

        let (_, out) = dispatch("badge buy Daily Bronze", &api).await;
        assert!(out.unwrap().contains("Bought 'Daily Bronze'"));

        let (_, out) = dispatch("badge buy Daily Bronze", &api).await;
        assert!(out.unwrap().contains("already owned"));

        let (_, out) = dispatch("badge owned", &api).await;
        let out = out.unwrap();
        assert!(out.contains("Daily Bronze"));
        assert!(out.contains("Verified Buyer"));

        let (_, out) = dispatch("badge list special", &api).await;
        let out = out.unwrap();
        assert!(out.contains("Trusted Reviewer"));
        assert!(!out.contains("Daily Bronze"));
    }
}

use std::sync::Arc;
use hostvoucher_common::traits::api::GamificationApi;

pub async fn handle_activate_command(args: &[&str], api: &Arc<dyn GamificationApi>) -> String {
    let email = args.first().map(|e| e.to_string());
    match api.activate(email).await {
        Ok(state) => format!("Mining activated. points={}", state.points),
        Err(e) => format!("Error: {}", e),
    }
}

pub async fn handle_deactivate_command(api: &Arc<dyn GamificationApi>) -> String {
    match api.deactivate().await {
        Ok(state) => format!("Mining deactivated. points={}", state.points),
        Err(e) => format!("Error: {}", e),
    }
}

pub async fn status(args: &[&str], api: &Arc<dyn GamificationApi>) -> String {
    let status = api.status().await;
    if args.first() == Some(&"json") {
        return serde_json::to_string_pretty(&status)
            .unwrap_or_else(|e| format!("Error: {}", e));
    }
    let mut out = format!(
        "Uptime={}s mining_running={} sessions={}\n",
        status.uptime_seconds, status.mining_running, status.attached_sessions
    );
    match &status.state {
        None => out.push_str("Not activated yet. Use 'activate [email]'.\n"),
        Some(st) => {
            out.push_str(&format!(
                "activated={} points={} badges={}\n",
                st.is_activated,
                st.points,
                st.badges_owned.len()
            ));
        }
    }
    if let Some(email) = &status.email {
        out.push_str(&format!("email={}\n", email));
    }
    out
}

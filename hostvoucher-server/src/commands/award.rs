use std::sync::Arc;
use hostvoucher_common::models::ActionKind;
use hostvoucher_common::traits::api::GamificationApi;
use hostvoucher_common::Error;
use hostvoucher_core::utils::time::format_remaining;

pub async fn handle_award_command(args: &[&str], api: &Arc<dyn GamificationApi>) -> String {
    if args.len() < 2 {
        return "Usage: award <click|share|visit> <subject>".to_string();
    }
    let kind: ActionKind = match args[0].parse() {
        Ok(k) => k,
        Err(e) => return format!("Error: {}", e),
    };
    let subject = args[1..].join(" ");

    match api.award(kind, &subject).await {
        Ok(award) => format!(
            "+{} for {} on '{}'. points={}",
            award.points_awarded, award.kind, award.subject_id, award.total_points
        ),
        Err(Error::OnCooldown { kind, subject, remaining_ms }) => format!(
            "Still cooling down: next {} reward for '{}' in {}",
            kind,
            subject,
            format_remaining(remaining_ms)
        ),
        Err(Error::NotActivated) => "Points mining is not activated. Use 'activate' first.".to_string(),
        Err(e) => format!("Error: {}", e),
    }
}

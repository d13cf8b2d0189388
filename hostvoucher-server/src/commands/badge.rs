use std::sync::Arc;
use hostvoucher_common::models::{BadgeDefinition, BadgeTier};
use hostvoucher_common::traits::api::GamificationApi;
use hostvoucher_common::Error;

pub async fn handle_badge_command(args: &[&str], api: &Arc<dyn GamificationApi>) -> String {
    if args.is_empty() {
        return "Usage: badge <list [tier]|owned|buy <name>|grant <name>>".to_string();
    }
    match args[0] {
        "list" => {
            let tier = match args.get(1) {
                Some(raw) => match raw.parse::<BadgeTier>() {
                    Ok(t) => Some(t),
                    Err(e) => return format!("Error: {}", e),
                },
                None => None,
            };
            render_badges(&api.list_badges(tier))
        }
        "owned" => {
            let owned = api.owned_badges().await;
            if owned.is_empty() {
                "No badges owned yet.".to_string()
            } else {
                render_badges(&owned)
            }
        }
        "buy" => {
            if args.len() < 2 {
                return "Usage: badge buy <name>".to_string();
            }
            let name = args[1..].join(" ");
            match api.purchase_badge(&name).await {
                Ok(r) => format!("Bought '{}' for {}. points={}", r.badge, r.points_debited, r.total_points),
                Err(Error::InsufficientPoints { badge, price, available }) => format!(
                    "Not enough points for '{}': costs {}, you have {} ({} short).",
                    badge,
                    price,
                    available,
                    price.saturating_sub(available)
                ),
                Err(Error::AlreadyOwned(badge)) => format!("'{}' is already owned.", badge),
                Err(e) => format!("Error: {}", e),
            }
        }
        "grant" => {
            if args.len() < 2 {
                return "Usage: badge grant <special badge name>".to_string();
            }
            let name = args[1..].join(" ");
            match api.grant_special_badge(&name).await {
                Ok(r) => format!("Granted '{}' (+{}). points={}", r.badge, r.points_credited, r.total_points),
                Err(Error::AlreadyOwned(badge)) => format!("'{}' is already owned.", badge),
                Err(e) => format!("Error: {}", e),
            }
        }
        other => format!("Unknown badge subcommand '{}'.", other),
    }
}

fn render_badges(badges: &[BadgeDefinition]) -> String {
    let mut out = String::new();
    for b in badges {
        let price = if b.is_purchasable() {
            format!("{} pts", b.price_points)
        } else {
            format!("grants {} pts", b.grant_points)
        };
        let epic = if b.is_epic { " [epic]" } else { "" };
        out.push_str(&format!("  {:<20} {:<9} {}{}\n", b.name, b.tier.label(), price, epic));
    }
    out
}

//! Plain-text report rendering.
//!
//! Each organization becomes one tab-indented block; blocks are separated by
//! a single blank line.

use topup_core::formatting::format_line;
use topup_core::models::{AggregatedOrganization, MemberView};

/// Render the full report for `organizations`, in the order given.
pub fn render(organizations: &[AggregatedOrganization]) -> String {
    organizations
        .iter()
        .map(render_organization)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a single organization block.
pub fn render_organization(organization: &AggregatedOrganization) -> String {
    let mut block = String::new();

    block.push_str(&format_line("Company Id", Some(&organization.id.to_string()), 1));
    block.push_str(&format_line("Company Name", Some(&organization.name), 1));
    block.push_str(&format_line("Users Emailed", None, 1));
    block.push_str(&render_members(&organization.notified));
    block.push_str(&format_line("Users Not Emailed", None, 1));
    block.push_str(&render_members(&organization.not_notified));
    block.push_str(&format_line(
        &format!("Total amount of top ups for {}", organization.name),
        Some(&organization.top_up_total.to_string()),
        1,
    ));

    block
}

fn render_members(members: &[MemberView]) -> String {
    members.iter().map(render_member).collect()
}

/// Identity line plus the before/after balances. The balance values are part
/// of the label, not a `: value` suffix.
fn render_member(member: &MemberView) -> String {
    let identity = format!(
        "{}, {}, {}",
        member.last_name, member.first_name, member.email
    );
    let previous = format!("Previous Token Balance, {}", member.previous_tokens);
    let new = format!("New Token Balance, {}", member.new_tokens);

    let mut lines = format_line(&identity, None, 2);
    lines.push_str(&format_line(&previous, None, 3));
    lines.push_str(&format_line(&new, None, 3));
    lines
}

// ── Tests ─────────────────────────────────────────────────────────────────────

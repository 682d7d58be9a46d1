use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// Identifier shared by organizations and the members that reference them.
pub type OrganizationId = i64;

/// An organization as read from the organizations JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique organization identifier.
    pub id: OrganizationId,
    /// Display name used in the report.
    pub name: String,
    /// Tokens granted to each active member per run.
    pub top_up: Amount,
    /// Whether this organization allows its members to be emailed.
    pub email_status: bool,
}

/// A member as read from the members JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Owning organization; may not resolve to any loaded organization.
    pub company_id: OrganizationId,
    /// Whether the member wants to be emailed.
    pub email_status: bool,
    /// Inactive members are ignored by the aggregator.
    pub active_status: bool,
    /// Token balance before this run's top-up.
    pub tokens: Amount,
}

impl Member {
    /// A member is notified only when both it and its organization opt in.
    pub fn is_notified_by(&self, organization: &Organization) -> bool {
        organization.email_status && self.email_status
    }
}

/// One member's line in the report, before and after the top-up.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberView {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Balance read from the input.
    pub previous_tokens: Amount,
    /// `previous_tokens` plus the organization's top-up.
    pub new_tokens: Amount,
}

impl MemberView {
    /// Build the view of `member` after receiving `top_up` tokens.
    pub fn new(member: &Member, top_up: Amount) -> Self {
        Self {
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            email: member.email.clone(),
            previous_tokens: member.tokens,
            new_tokens: member.tokens + top_up,
        }
    }
}

/// An organization joined with its active members, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedOrganization {
    pub id: OrganizationId,
    pub name: String,
    /// Top-up multiplied by the number of active members.
    pub top_up_total: Amount,
    /// Members that will be emailed, in group order.
    pub notified: Vec<MemberView>,
    /// Members that will not be emailed, in group order.
    pub not_notified: Vec<MemberView>,
}

impl AggregatedOrganization {
    /// Number of active members topped up for this organization.
    pub fn member_count(&self) -> usize {
        self.notified.len() + self.not_notified.len()
    }
}

//! Joins active members to their organizations and applies top-ups.

use std::collections::BTreeMap;

use topup_core::amount::Amount;
use topup_core::models::{
    AggregatedOrganization, Member, MemberView, Organization, OrganizationId,
};
use tracing::debug;

// ── TopUpTotals ───────────────────────────────────────────────────────────────

/// Run-wide totals accumulated across every reported organization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopUpTotals {
    pub organizations: usize,
    pub members: usize,
    pub notified: usize,
    pub not_notified: usize,
    pub tokens: Amount,
}

impl TopUpTotals {
    /// Add a single organization's figures to the running totals.
    pub fn add_organization(&mut self, organization: &AggregatedOrganization) {
        self.organizations += 1;
        self.members += organization.member_count();
        self.notified += organization.notified.len();
        self.not_notified += organization.not_notified.len();
        self.tokens = self.tokens + organization.top_up_total;
    }
}

// ── TopUpAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups active members under their organizations.
pub struct TopUpAggregator;

impl TopUpAggregator {
    /// Build one [`AggregatedOrganization`] per organization that has at least
    /// one active member.
    ///
    /// Output is sorted by organization id (ascending). Member groups whose
    /// `company_id` matches no organization are dropped silently.
    pub fn aggregate(
        organizations: &[Organization],
        members: &[Member],
    ) -> Vec<AggregatedOrganization> {
        Self::group_active_members(members)
            .into_iter()
            .filter_map(|(company_id, group)| {
                let Some(organization) = organizations.iter().find(|o| o.id == company_id)
                else {
                    debug!(
                        "Skipping {} active members of unknown organization {}",
                        group.len(),
                        company_id
                    );
                    return None;
                };
                Some(Self::aggregate_group(organization, &group))
            })
            .collect()
    }

    /// Sum up the figures from all organizations into a single [`TopUpTotals`].
    pub fn calculate_totals(data: &[AggregatedOrganization]) -> TopUpTotals {
        let mut totals = TopUpTotals::default();
        for organization in data {
            totals.add_organization(organization);
        }
        totals
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Active members keyed by organization id; `BTreeMap` keeps ids sorted.
    fn group_active_members(members: &[Member]) -> BTreeMap<OrganizationId, Vec<&Member>> {
        let mut groups: BTreeMap<OrganizationId, Vec<&Member>> = BTreeMap::new();
        for member in members.iter().filter(|m| m.active_status) {
            groups.entry(member.company_id).or_default().push(member);
        }
        groups
    }

    fn aggregate_group(organization: &Organization, group: &[&Member]) -> AggregatedOrganization {
        let mut notified = Vec::new();
        let mut not_notified = Vec::new();

        for member in group {
            let view = MemberView::new(member, organization.top_up);
            if member.is_notified_by(organization) {
                notified.push(view);
            } else {
                not_notified.push(view);
            }
        }

        AggregatedOrganization {
            id: organization.id,
            name: organization.name.clone(),
            top_up_total: organization.top_up.times(group.len()),
            notified,
            not_notified,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_org(id: i64, name: &str, top_up: i64, email_status: bool) -> Organization {
        Organization {
            id,
            name: name.to_string(),
            top_up: top_up.into(),
            email_status,
        }
    }

    fn make_member(
        id: i64,
        first: &str,
        last: &str,
        company_id: i64,
        email_status: bool,
        active_status: bool,
        tokens: i64,
    ) -> Member {
        Member {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@test.com", first.to_lowercase()),
            company_id,
            email_status,
            active_status,
            tokens: tokens.into(),
        }
    }

    fn acme_fixture() -> (Vec<Organization>, Vec<Member>) {
        let organizations = vec![make_org(1, "Acme", 10, true)];
        let members = vec![
            make_member(1, "Jo", "Ann", 1, true, true, 5),
            make_member(2, "Bo", "Zed", 1, false, true, 20),
            make_member(3, "Cy", "Old", 1, true, false, 99),
        ];
        (organizations, members)
    }

    // ── aggregate ─────────────────────────────────────────────────────────────

    #[test]
    fn test_aggregate_acme_scenario() {
        let (organizations, members) = acme_fixture();
        let result = TopUpAggregator::aggregate(&organizations, &members);

        assert_eq!(result.len(), 1);
        let acme = &result[0];
        assert_eq!(acme.id, 1);
        assert_eq!(acme.name, "Acme");
        assert_eq!(acme.top_up_total, Amount::Int(20));

        assert_eq!(acme.notified.len(), 1);
        assert_eq!(acme.notified[0].first_name, "Jo");
        assert_eq!(acme.notified[0].previous_tokens, Amount::Int(5));
        assert_eq!(acme.notified[0].new_tokens, Amount::Int(15));

        assert_eq!(acme.not_notified.len(), 1);
        assert_eq!(acme.not_notified[0].first_name, "Bo");
        assert_eq!(acme.not_notified[0].previous_tokens, Amount::Int(20));
        assert_eq!(acme.not_notified[0].new_tokens, Amount::Int(30));
    }

    #[test]
    fn test_aggregate_empty_members() {
        let organizations = vec![make_org(1, "Acme", 10, true)];
        assert!(TopUpAggregator::aggregate(&organizations, &[]).is_empty());
    }

    #[test]
    fn test_aggregate_skips_unknown_organization() {
        let organizations = vec![make_org(1, "Acme", 10, true)];
        let members = vec![
            make_member(1, "Jo", "Ann", 1, true, true, 5),
            make_member(2, "Lost", "Soul", 42, true, true, 5),
        ];

        let result = TopUpAggregator::aggregate(&organizations, &members);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
        assert_eq!(result[0].member_count(), 1);
    }

    #[test]
    fn test_aggregate_omits_organization_with_only_inactive_members() {
        let organizations = vec![
            make_org(1, "Acme", 10, true),
            make_org(2, "Dormant", 50, true),
        ];
        let members = vec![
            make_member(1, "Jo", "Ann", 1, true, true, 5),
            make_member(2, "Zz", "Sleep", 2, true, false, 5),
        ];

        let result = TopUpAggregator::aggregate(&organizations, &members);
        let ids: Vec<i64> = result.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_aggregate_omits_organization_without_members() {
        let organizations = vec![
            make_org(1, "Acme", 10, true),
            make_org(2, "Empty", 10, true),
        ];
        let members = vec![make_member(1, "Jo", "Ann", 1, true, true, 5)];

        let result = TopUpAggregator::aggregate(&organizations, &members);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_aggregate_sorted_by_organization_id() {
        let organizations = vec![
            make_org(30, "C", 1, true),
            make_org(10, "A", 1, true),
            make_org(20, "B", 1, true),
        ];
        let members = vec![
            make_member(1, "X", "X", 20, true, true, 0),
            make_member(2, "Y", "Y", 30, true, true, 0),
            make_member(3, "Z", "Z", 10, true, true, 0),
        ];

        let result = TopUpAggregator::aggregate(&organizations, &members);
        let ids: Vec<i64> = result.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn test_aggregate_organization_flag_off_notifies_nobody() {
        let organizations = vec![make_org(1, "Quiet", 5, false)];
        let members = vec![
            make_member(1, "Jo", "Ann", 1, true, true, 0),
            make_member(2, "Bo", "Zed", 1, true, true, 0),
        ];

        let result = TopUpAggregator::aggregate(&organizations, &members);
        assert!(result[0].notified.is_empty());
        assert_eq!(result[0].not_notified.len(), 2);
    }

    #[test]
    fn test_aggregate_preserves_member_order_within_partitions() {
        let organizations = vec![make_org(1, "Acme", 1, true)];
        let members = vec![
            make_member(1, "A", "A", 1, true, true, 0),
            make_member(2, "B", "B", 1, false, true, 0),
            make_member(3, "C", "C", 1, true, true, 0),
            make_member(4, "D", "D", 1, false, true, 0),
        ];

        let result = TopUpAggregator::aggregate(&organizations, &members);
        let notified: Vec<&str> = result[0]
            .notified
            .iter()
            .map(|m| m.first_name.as_str())
            .collect();
        let not_notified: Vec<&str> = result[0]
            .not_notified
            .iter()
            .map(|m| m.first_name.as_str())
            .collect();
        assert_eq!(notified, vec!["A", "C"]);
        assert_eq!(not_notified, vec!["B", "D"]);
    }

    #[test]
    fn test_aggregate_duplicate_organization_id_uses_first_match() {
        let organizations = vec![
            make_org(1, "First", 10, true),
            make_org(1, "Second", 99, false),
        ];
        let members = vec![make_member(1, "Jo", "Ann", 1, true, true, 0)];

        let result = TopUpAggregator::aggregate(&organizations, &members);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "First");
        assert_eq!(result[0].top_up_total, Amount::Int(10));
        assert_eq!(result[0].notified.len(), 1);
    }

    #[test]
    fn test_aggregate_fractional_top_up() {
        let organizations = vec![Organization {
            top_up: Amount::Float(2.5),
            ..make_org(1, "Acme", 0, true)
        }];
        let members = vec![
            make_member(1, "Jo", "Ann", 1, true, true, 1),
            Member {
                tokens: Amount::Float(0.5),
                ..make_member(2, "Bo", "Zed", 1, true, true, 0)
            },
        ];

        let result = TopUpAggregator::aggregate(&organizations, &members);
        assert_eq!(result[0].top_up_total, Amount::Float(5.0));
        assert_eq!(result[0].notified[0].new_tokens, Amount::Float(3.5));
        assert_eq!(result[0].notified[1].new_tokens, Amount::Float(3.0));
    }

    #[test]
    fn test_aggregate_large_integer_balance_stays_exact() {
        let organizations = vec![make_org(1, "Acme", 1, true)];
        let members = vec![make_member(1, "Jo", "Ann", 1, true, true, 9_007_199_254_740_993)];

        let result = TopUpAggregator::aggregate(&organizations, &members);
        let view = &result[0].notified[0];
        assert_eq!(view.previous_tokens, Amount::Int(9_007_199_254_740_993));
        assert_eq!(view.new_tokens, Amount::Int(9_007_199_254_740_994));
        assert_ne!(view.new_tokens, view.previous_tokens);
    }

    #[test]
    fn test_aggregate_invariants_hold_for_mixed_input() {
        let organizations = vec![
            make_org(1, "A", 3, true),
            make_org(2, "B", 7, false),
            make_org(3, "C", 11, true),
        ];
        let mut members = Vec::new();
        for i in 0..30 {
            members.push(make_member(
                i,
                &format!("F{i}"),
                &format!("L{i}"),
                i % 4 + 1,
                i % 3 == 0,
                i % 5 != 0,
                i,
            ));
        }

        let result = TopUpAggregator::aggregate(&organizations, &members);

        for aggregated in &result {
            let organization = organizations.iter().find(|o| o.id == aggregated.id).unwrap();
            let expected = members
                .iter()
                .filter(|m| m.active_status && m.company_id == aggregated.id)
                .count();
            assert_eq!(aggregated.member_count(), expected);
            assert_eq!(
                aggregated.top_up_total,
                organization.top_up.times(aggregated.member_count())
            );
            for view in aggregated.notified.iter().chain(&aggregated.not_notified) {
                assert_eq!(view.new_tokens, view.previous_tokens + organization.top_up);
            }
            if !organization.email_status {
                assert!(aggregated.notified.is_empty());
            }
        }

        let ids: Vec<i64> = result.iter().map(|o| o.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        // company_id 4 has members but no organization.
        assert!(!ids.contains(&4));
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let (organizations, members) = acme_fixture();
        let first = TopUpAggregator::aggregate(&organizations, &members);
        let second = TopUpAggregator::aggregate(&organizations, &members);
        assert_eq!(first, second);
    }

    // ── calculate_totals ──────────────────────────────────────────────────────

    #[test]
    fn test_calculate_totals_sums_all_organizations() {
        let organizations = vec![make_org(1, "A", 10, true), make_org(2, "B", 4, true)];
        let members = vec![
            make_member(1, "Jo", "Ann", 1, true, true, 0),
            make_member(2, "Bo", "Zed", 1, false, true, 0),
            make_member(3, "Cy", "Old", 2, true, true, 0),
        ];

        let result = TopUpAggregator::aggregate(&organizations, &members);
        let totals = TopUpAggregator::calculate_totals(&result);

        assert_eq!(totals.organizations, 2);
        assert_eq!(totals.members, 3);
        assert_eq!(totals.notified, 2);
        assert_eq!(totals.not_notified, 1);
        assert_eq!(totals.tokens, Amount::Int(24));
    }

    #[test]
    fn test_calculate_totals_empty() {
        let totals = TopUpAggregator::calculate_totals(&[]);
        assert_eq!(totals, TopUpTotals::default());
    }
}

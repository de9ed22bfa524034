//! Bundled business entities for the entity picker.
//!
//! Stands in for the organization's real records until a backing store
//! exists: a fixed list per category, in display order.

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;

use canvas::catalog::{BusinessCategory, EntityDirectory, EntitySummary};

/// In-memory entity directory with a fixed roster per category.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory;

impl StaticDirectory {
    fn rows(category: BusinessCategory) -> &'static [(&'static str, &'static str, &'static str)] {
        match category {
            BusinessCategory::Organization => &[
                ("org-bitcoin-corp", "The Bitcoin Corporation", "Parent company."),
                ("org-audex", "AUDEX Treasury", "Holds 51% of issued shares."),
                ("org-b0ase", "b0ase", "Tools studio."),
            ],
            BusinessCategory::Role => &[
                ("role-ceo", "CEO", "Executive leadership."),
                ("role-cto", "CTO", "Technology strategy."),
                ("role-cfo", "CFO", "Capital management."),
                ("role-counsel", "General Counsel", "Regulatory compliance."),
            ],
            BusinessCategory::Member => &[
                ("member-alice", "Alice", "Protocol engineer."),
                ("member-bob", "Bob", "Wallet engineer."),
                ("member-carol", "Carol", "Head of design."),
            ],
            BusinessCategory::Instrument => &[
                ("inst-cash", "$CASH", "Business management token."),
                ("inst-bos", "$bOS", "Operating system token."),
                ("inst-bwriter", "$bWriter", "Writing platform token."),
            ],
            BusinessCategory::Contract => &[
                ("contract-multisig", "Multisig", "Multi-signature treasury."),
                ("contract-escrow", "Escrow", "Milestone escrow."),
                ("contract-vesting", "Vesting", "Token vesting schedule."),
            ],
            BusinessCategory::Wallet => &[
                ("wallet-treasury", "Corporate Treasury", "Multi-sig corporate wallet."),
                ("wallet-hot", "Hot Wallet", "Operating funds."),
                ("wallet-cold", "Cold Storage", "Reserve holdings."),
            ],
            BusinessCategory::Integration => &[
                ("int-handcash", "HandCash", "Wallet OAuth."),
                ("int-stripe", "Stripe", "Fiat payments."),
                ("int-github", "GitHub", "Developer auth."),
            ],
            BusinessCategory::Workflow => &[
                ("bitcoin-corp-org", "The Bitcoin Corporation", "Organization chart."),
                ("payroll-run", "Monthly Payroll Run", "Approve hours and pay the team."),
            ],
            BusinessCategory::Contact => &[
                ("contact-investor", "Lead Investor", "Series A."),
                ("contact-auditor", "External Auditor", "Annual accounts."),
            ],
            BusinessCategory::Agent => &[
                ("agent-marketing", "Marketing AI Agent", "Schedules campaigns."),
                ("agent-trading", "Trading Bot", "Market making on the exchange."),
                ("agent-support", "Customer Service AI", "Answers support tickets."),
                ("agent-twitter", "Twitter Bots", "Social automation."),
            ],
        }
    }
}

impl EntityDirectory for StaticDirectory {
    fn entities(&self, category: BusinessCategory) -> Vec<EntitySummary> {
        Self::rows(category)
            .iter()
            .map(|(id, name, description)| EntitySummary::new(*id, *name).with_description(*description))
            .collect()
    }
}

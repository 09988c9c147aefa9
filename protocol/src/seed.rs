//! Boot-time demo data.
//!
//! The platform has no persistence; every session starts from this mock
//! directory of Ugandan creators, donor funds, and in-flight projects.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::storage::Store;
use crate::types::{
    Milestone, MilestoneStatus, PaymentMethod, PaymentMethodDetails, Project, Transaction,
    TransactionStatus, TransactionType, User, UserRole,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("valid seed timestamp")
}

fn user(id: u64, name: &str, role: UserRole, balance: i128, interests: &[&str]) -> User {
    User {
        id,
        name: name.to_string(),
        role,
        balance,
        reserved: 0,
        interests: interests.iter().map(|s| s.to_string()).collect(),
        total_raised: 0,
        active_projects: 0,
        total_invested: 0,
        active_investments: 0,
    }
}

/// Build the demo store the frontend boots against.
pub fn demo_store() -> Store {
    let mut store = Store::default();

    // ── Users ────────────────────────────────────────────────
    let mut amani = user(
        1,
        "Amani Girls Foundation",
        UserRole::Creator,
        3_500_000,
        &["Girls Education", "Community Development", "Women Empowerment"],
    );
    amani.total_raised = 45_000;
    amani.active_projects = 2;

    let mut makerere = user(
        2,
        "Makerere Impact Fund",
        UserRole::Donor,
        250_000,
        &["Education", "Healthcare", "Youth Empowerment", "Technology"],
    );
    makerere.total_invested = 83_000;
    makerere.active_investments = 2;

    let mut nile_basin = user(
        3,
        "Nile Basin Community Fund",
        UserRole::Donor,
        180_000,
        &["Clean Water", "Agriculture", "Climate Action", "Sanitation"],
    );
    nile_basin.total_invested = 95_000;
    nile_basin.active_investments = 12;

    let mut innovation_trust = user(
        4,
        "Uganda Innovation Trust",
        UserRole::Donor,
        420_000,
        &["Technology", "Innovation", "Youth Skills", "Digital Literacy"],
    );
    innovation_trust.total_invested = 280_000;
    innovation_trust.active_investments = 15;

    let mut bright_futures = user(
        5,
        "Bright Futures Initiative",
        UserRole::Creator,
        8_500_000,
        &["Child Education", "School Feeding", "Orphan Care"],
    );
    bright_futures.total_raised = 32_000;
    bright_futures.active_projects = 1;

    store.users = vec![amani, makerere, nile_basin, innovation_trust, bright_futures];

    // ── Projects ─────────────────────────────────────────────
    store.projects = vec![
        Project {
            id: 10,
            creator_id: 1,
            title: "Northern Uganda Girls Education Program".to_string(),
            description: "Scholarships, school supplies, and menstrual hygiene kits for 200 \
                          girls in Gulu and Kitgum districts."
                .to_string(),
            category: "Girls Education".to_string(),
            funding_goal: 85_000,
            current_funding: 28_000,
            smart_contract_address: "0xc0ffee254729296a45a3885639ac7e10f9d54979".to_string(),
            milestones: vec![
                Milestone {
                    id: 11,
                    title: "Phase 1: School Supplies & Scholarships".to_string(),
                    description: "Procure uniforms, books, and scholastic materials for 200 \
                                  girls. Pay school fees for first term."
                        .to_string(),
                    amount: 28_000,
                    status: MilestoneStatus::Approved,
                    due_date: date(2026, 2, 15),
                    proof_document_url: Some("procurement_receipts_term1.pdf".to_string()),
                    feedback: None,
                },
                Milestone {
                    id: 12,
                    title: "Phase 2: Menstrual Hygiene Kits Distribution".to_string(),
                    description: "Distribute reusable sanitary pads and hygiene education to \
                                  all 200 girls. Train 15 peer educators."
                        .to_string(),
                    amount: 22_000,
                    status: MilestoneStatus::PendingSubmission,
                    due_date: date(2026, 4, 20),
                    proof_document_url: None,
                    feedback: None,
                },
                Milestone {
                    id: 13,
                    title: "Phase 3: Teacher Training & Community Mobilization".to_string(),
                    description: "Train 30 teachers on gender-responsive teaching. Conduct 10 \
                                  community dialogues on girls' education."
                        .to_string(),
                    amount: 35_000,
                    status: MilestoneStatus::Locked,
                    due_date: date(2026, 7, 10),
                    proof_document_url: None,
                    feedback: None,
                },
            ],
        },
        Project {
            id: 20,
            creator_id: 5,
            title: "Orphan Care & Feeding Program - Kampala".to_string(),
            description: "Daily meals, school fees, and psychosocial support for 150 orphaned \
                          and vulnerable children in Kampala slums."
                .to_string(),
            category: "Child Welfare".to_string(),
            funding_goal: 120_000,
            current_funding: 45_000,
            smart_contract_address: "0x5aae3bb2f6ea181b2b5e4c1e3a1c2f9d8e7b6a50".to_string(),
            milestones: vec![
                Milestone {
                    id: 21,
                    title: "Food & Nutrition Program (6 months)".to_string(),
                    description: "Provide daily nutritious meals to 150 children. Hire 3 cooks \
                                  and purchase food supplies."
                        .to_string(),
                    amount: 45_000,
                    status: MilestoneStatus::InReview,
                    due_date: date(2026, 6, 30),
                    proof_document_url: Some("feeding_program_report.pdf".to_string()),
                    feedback: None,
                },
                Milestone {
                    id: 22,
                    title: "School Fees & Supplies".to_string(),
                    description: "Pay school fees for 150 children and provide uniforms, \
                                  books, shoes."
                        .to_string(),
                    amount: 38_000,
                    status: MilestoneStatus::Locked,
                    due_date: date(2026, 9, 15),
                    proof_document_url: None,
                    feedback: None,
                },
                Milestone {
                    id: 23,
                    title: "Psychosocial Support & Health".to_string(),
                    description: "Hire 2 counselors, conduct monthly health checkups, provide \
                                  basic medical care."
                        .to_string(),
                    amount: 37_000,
                    status: MilestoneStatus::Locked,
                    due_date: date(2026, 12, 20),
                    proof_document_url: None,
                    feedback: None,
                },
            ],
        },
    ];

    // ── Ledger history ───────────────────────────────────────
    store.transactions = vec![Transaction {
        id: 30,
        user_id: 1,
        tx_type: TransactionType::FundRelease,
        amount: 28_000,
        project_id: Some(10),
        milestone_id: Some(11),
        withdrawal_request_id: None,
        counterparty: Some("Milestone: Phase 1: School Supplies & Scholarships".to_string()),
        date: ts(2026, 2, 20, 14, 30),
        status: TransactionStatus::Completed,
        tx_hash: Some("0x8f3b2a1c9d7e6f5a4b3c2d1e0f9a8b7c6d5e4f30".to_string()),
        description: Some("Fund release for \"Phase 1: School Supplies & Scholarships\"".to_string()),
    }];

    // ── Payment methods ──────────────────────────────────────
    store.payment_methods = vec![
        PaymentMethod {
            id: 40,
            user_id: 1,
            details: PaymentMethodDetails::BankAccount {
                bank_name: "Stanbic Bank Uganda".to_string(),
                account_number: "9030012345678".to_string(),
                account_name: "Amani Girls Foundation".to_string(),
            },
            is_default: true,
            created_at: ts(2026, 1, 5, 9, 0),
        },
        PaymentMethod {
            id: 41,
            user_id: 1,
            details: PaymentMethodDetails::MobileMoney {
                provider: "MTN_MOBILE_MONEY".to_string(),
                phone_number: "+256772123456".to_string(),
                registered_name: "Amani Girls Foundation".to_string(),
            },
            is_default: false,
            created_at: ts(2026, 1, 12, 11, 30),
        },
    ];

    store.reserve_ids_through(100);
    store
}

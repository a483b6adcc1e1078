use soroban_sdk::{contracterror, contracttype, Address, String};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Token,
    CampaignCount,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Campaign(CampaignId),
    CreatorCampaigns(Address),
    Contributions(CampaignId, Address),
    Request(CampaignId, RequestIndex),
    Approval(CampaignId, RequestIndex, Address),
}

pub type CampaignId = u64;
pub type RequestIndex = u32;

// One funding effort's ledger. Requests and contribution histories live
// under their own persistent keys; this struct carries the counters.
#[derive(Clone)]
#[contracttype]
pub struct Campaign {
    pub id: CampaignId,
    pub manager: Address,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub minimum_contribution: i128,
    pub target_amount: i128,
    pub created_at: u64,
    pub deadline: u64,
    pub balance: i128,
    pub total_raised: i128,
    pub contributors_count: u32,
    pub target_reached: bool,
    pub requests_count: RequestIndex,
}

// One entry in a contributor's append-only history
#[derive(Clone)]
#[contracttype]
pub struct Contribution {
    pub amount: i128,
    pub timestamp: u64,
    pub message: String,
}

// A manager proposal to disburse part of the balance.
// Approval set membership is stored under PersistentKey::Approval;
// approval_count is its cardinality.
#[derive(Clone)]
#[contracttype]
pub struct SpendingRequest {
    pub description: String,
    pub amount: i128,
    pub recipient: Address,
    pub approval_count: u32,
    pub is_complete: bool,
}

// Read-only snapshot returned by get_summary
#[derive(Clone)]
#[contracttype]
pub struct CampaignSummary {
    pub minimum_contribution: i128,
    pub balance: i128,
    pub contributors_count: u32,
    pub deadline: u64,
    pub manager: Address,
    pub target_amount: i128,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub is_active: bool,
    pub target_reached: bool,
    pub total_raised: i128,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CampaignError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidMinimum = 3,
    InvalidTarget = 4,
    InvalidDuration = 5,
    ContributionTooSmall = 6,
    CampaignNotFound = 7,
    RequestNotFound = 8,
    NotManager = 9,
    NotContributor = 10,
    InsufficientBalance = 11,
    DuplicateApproval = 12,
    RequestComplete = 13,
    MajorityNotReached = 14,
    InvalidAmount = 15,
}

// Constants
pub const SECONDS_PER_DAY: u64 = 86400;
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days

#![no_std]


mod events;
mod storage_types;

use events::{
    emit_campaign_created, emit_contribution_made, emit_request_approved, emit_request_created,
    emit_request_finalized, emit_target_reached, CampaignCreatedEvent, ContributionMadeEvent,
    RequestApprovedEvent, RequestCreatedEvent, RequestFinalizedEvent, TargetReachedEvent,
};
use storage_types::{
    Campaign, CampaignError, CampaignId, CampaignSummary, Contribution, DataKey, PersistentKey,
    RequestIndex, SpendingRequest, SECONDS_PER_DAY, TTL_INSTANCE, TTL_PERSISTENT,
};

use soroban_sdk::{
    contract, contractimpl, panic_with_error, token, Address, Env, String, Vec,
};

#[contract]
pub struct CrowdfundingContract;

#[contractimpl]
impl CrowdfundingContract {
    /// Initialize the contract with the payment token. One-time.
    pub fn initialize(e: Env, token: Address) {
        if e.storage().instance().has(&DataKey::Token) {
            panic_with_error!(&e, CampaignError::AlreadyInitialized);
        }

        e.storage().instance().set(&DataKey::Token, &token);
        e.storage().instance().set(&DataKey::CampaignCount, &0u64);

        extend_instance(&e);
    }

    /// Create a new campaign owned by `creator` and register it
    pub fn create_campaign(
        e: Env,
        creator: Address,
        minimum_contribution: i128,
        target_amount: i128,
        duration_days: u64,
        title: String,
        description: String,
        category: String,
        image_url: String,
    ) -> CampaignId {
        creator.require_auth();
        get_token(&e);

        if minimum_contribution <= 0 {
            panic_with_error!(&e, CampaignError::InvalidMinimum);
        }
        if target_amount <= 0 {
            panic_with_error!(&e, CampaignError::InvalidTarget);
        }
        if duration_days == 0 {
            panic_with_error!(&e, CampaignError::InvalidDuration);
        }

        let campaign_id: CampaignId = e.storage().instance().get(&DataKey::CampaignCount).unwrap();
        let now = e.ledger().timestamp();
        let deadline = duration_days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|duration| now.checked_add(duration))
            .unwrap_or_else(|| panic_with_error!(&e, CampaignError::InvalidDuration));

        let campaign = Campaign {
            id: campaign_id,
            manager: creator.clone(),
            title,
            description,
            category,
            image_url,
            minimum_contribution,
            target_amount,
            created_at: now,
            deadline,
            balance: 0,
            total_raised: 0,
            contributors_count: 0,
            target_reached: false,
            requests_count: 0,
        };

        save_campaign(&e, &campaign);

        // Index by creator
        let creator_key = PersistentKey::CreatorCampaigns(creator.clone());
        let mut by_creator: Vec<CampaignId> = e
            .storage()
            .persistent()
            .get(&creator_key)
            .unwrap_or_else(|| Vec::new(&e));
        by_creator.push_back(campaign_id);
        e.storage().persistent().set(&creator_key, &by_creator);
        extend_persistent(&e, &creator_key);

        e.storage()
            .instance()
            .set(&DataKey::CampaignCount, &(campaign_id + 1));
        extend_instance(&e);

        emit_campaign_created(
            &e,
            CampaignCreatedEvent {
                campaign_id,
                manager: creator,
                target_amount,
                deadline: campaign.deadline,
            },
        );

        campaign_id
    }

    /// Contribute `amount` of the payment token to a campaign
    pub fn contribute(
        e: Env,
        campaign_id: CampaignId,
        contributor: Address,
        amount: i128,
        message: Option<String>,
    ) {
        contributor.require_auth();

        let mut campaign = get_campaign(&e, campaign_id);
        if amount < campaign.minimum_contribution {
            panic_with_error!(&e, CampaignError::ContributionTooSmall);
        }

        let token_addr = get_token(&e);
        token::Client::new(&e, &token_addr).transfer(
            &contributor,
            &e.current_contract_address(),
            &amount,
        );

        let message = message.unwrap_or_else(|| String::from_str(&e, ""));

        // Append to the contributor's history; key presence is the
        // "has ever contributed" check used by approve_request
        let history_key = PersistentKey::Contributions(campaign_id, contributor.clone());
        let mut history: Vec<Contribution> = e
            .storage()
            .persistent()
            .get(&history_key)
            .unwrap_or_else(|| Vec::new(&e));
        let first_contribution = history.is_empty();
        history.push_back(Contribution {
            amount,
            timestamp: e.ledger().timestamp(),
            message: message.clone(),
        });
        e.storage().persistent().set(&history_key, &history);
        extend_persistent(&e, &history_key);

        if first_contribution {
            campaign.contributors_count += 1;
        }
        campaign.balance += amount;
        campaign.total_raised += amount;

        let crossed_target =
            !campaign.target_reached && campaign.total_raised >= campaign.target_amount;
        if crossed_target {
            campaign.target_reached = true;
        }
        let total_raised = campaign.total_raised;

        save_campaign(&e, &campaign);
        extend_instance(&e);

        emit_contribution_made(
            &e,
            ContributionMadeEvent {
                campaign_id,
                contributor,
                amount,
                message,
            },
        );
        if crossed_target {
            emit_target_reached(
                &e,
                TargetReachedEvent {
                    campaign_id,
                    total_raised,
                },
            );
        }
    }

    /// Create a spending request. Manager only; cannot exceed the balance
    pub fn create_request(
        e: Env,
        campaign_id: CampaignId,
        caller: Address,
        description: String,
        amount: i128,
        recipient: Address,
    ) -> RequestIndex {
        caller.require_auth();

        let mut campaign = get_campaign(&e, campaign_id);
        if caller != campaign.manager {
            panic_with_error!(&e, CampaignError::NotManager);
        }
        if amount <= 0 {
            panic_with_error!(&e, CampaignError::InvalidAmount);
        }
        if amount > campaign.balance {
            panic_with_error!(&e, CampaignError::InsufficientBalance);
        }

        let request_index = campaign.requests_count;
        let request = SpendingRequest {
            description,
            amount,
            recipient: recipient.clone(),
            approval_count: 0,
            is_complete: false,
        };

        save_request(&e, campaign_id, request_index, &request);
        campaign.requests_count += 1;
        save_campaign(&e, &campaign);
        extend_instance(&e);

        emit_request_created(
            &e,
            RequestCreatedEvent {
                campaign_id,
                request_index,
                amount,
                recipient,
            },
        );

        request_index
    }

    /// Approve a spending request. Contributors only, once per request
    pub fn approve_request(e: Env, campaign_id: CampaignId, caller: Address, index: RequestIndex) {
        caller.require_auth();

        get_campaign(&e, campaign_id);
        let contributions_key = PersistentKey::Contributions(campaign_id, caller.clone());
        if !e.storage().persistent().has(&contributions_key) {
            panic_with_error!(&e, CampaignError::NotContributor);
        }

        let mut request = get_request(&e, campaign_id, index);
        if request.is_complete {
            panic_with_error!(&e, CampaignError::RequestComplete);
        }

        let approval_key = PersistentKey::Approval(campaign_id, index, caller.clone());
        if e.storage().persistent().has(&approval_key) {
            panic_with_error!(&e, CampaignError::DuplicateApproval);
        }

        e.storage().persistent().set(&approval_key, &true);
        extend_persistent(&e, &approval_key);
        request.approval_count += 1;
        let approval_count = request.approval_count;
        save_request(&e, campaign_id, index, &request);
        extend_instance(&e);

        emit_request_approved(
            &e,
            RequestApprovedEvent {
                campaign_id,
                request_index: index,
                approver: caller,
                approval_count,
            },
        );
    }

    /// Finalize a request once approvals pass a strict majority of
    /// contributors. Transfers the amount to the recipient. Terminal
    pub fn finalize_request(e: Env, campaign_id: CampaignId, caller: Address, index: RequestIndex) {
        caller.require_auth();

        let mut campaign = get_campaign(&e, campaign_id);
        if caller != campaign.manager {
            panic_with_error!(&e, CampaignError::NotManager);
        }

        let mut request = get_request(&e, campaign_id, index);
        if request.is_complete {
            panic_with_error!(&e, CampaignError::RequestComplete);
        }

        // Exactly half does not qualify
        if (request.approval_count as u64) * 2 <= campaign.contributors_count as u64 {
            panic_with_error!(&e, CampaignError::MajorityNotReached);
        }
        // Balance may have shrunk since the request was created
        if request.amount > campaign.balance {
            panic_with_error!(&e, CampaignError::InsufficientBalance);
        }

        let token_addr = get_token(&e);
        token::Client::new(&e, &token_addr).transfer(
            &e.current_contract_address(),
            &request.recipient,
            &request.amount,
        );

        campaign.balance -= request.amount;
        request.is_complete = true;

        save_request(&e, campaign_id, index, &request);
        save_campaign(&e, &campaign);
        extend_instance(&e);

        emit_request_finalized(
            &e,
            RequestFinalizedEvent {
                campaign_id,
                request_index: index,
                amount: request.amount,
                recipient: request.recipient,
            },
        );
    }

    /// View functions
    pub fn get_deployed_campaigns(e: Env) -> Vec<CampaignId> {
        let count: u64 = e
            .storage()
            .instance()
            .get(&DataKey::CampaignCount)
            .unwrap_or(0);
        let mut campaigns = Vec::new(&e);
        for id in 0..count {
            campaigns.push_back(id);
        }
        campaigns
    }

    pub fn get_campaign_count(e: Env) -> u64 {
        e.storage()
            .instance()
            .get(&DataKey::CampaignCount)
            .unwrap_or(0)
    }

    pub fn get_campaigns_by_creator(e: Env, creator: Address) -> Vec<CampaignId> {
        e.storage()
            .persistent()
            .get(&PersistentKey::CreatorCampaigns(creator))
            .unwrap_or_else(|| Vec::new(&e))
    }

    pub fn get_summary(e: Env, campaign_id: CampaignId) -> CampaignSummary {
        let campaign = get_campaign(&e, campaign_id);
        CampaignSummary {
            minimum_contribution: campaign.minimum_contribution,
            balance: campaign.balance,
            contributors_count: campaign.contributors_count,
            deadline: campaign.deadline,
            manager: campaign.manager,
            target_amount: campaign.target_amount,
            title: campaign.title,
            description: campaign.description,
            category: campaign.category,
            image_url: campaign.image_url,
            is_active: e.ledger().timestamp() < campaign.deadline,
            target_reached: campaign.target_reached,
            total_raised: campaign.total_raised,
        }
    }

    pub fn get_campaign_details(e: Env, campaign_id: CampaignId) -> (String, String, String, String) {
        let campaign = get_campaign(&e, campaign_id);
        (
            campaign.title,
            campaign.description,
            campaign.category,
            campaign.image_url,
        )
    }

    /// Funding progress in percent, floored; uncapped when over-funded
    pub fn get_progress(e: Env, campaign_id: CampaignId) -> u32 {
        let campaign = get_campaign(&e, campaign_id);
        ((campaign.total_raised * 100) / campaign.target_amount) as u32
    }

    /// All of a contributor's entries as three parallel sequences
    /// (amounts, timestamps, messages); empty if they never contributed
    pub fn get_contributor_history(
        e: Env,
        campaign_id: CampaignId,
        contributor: Address,
    ) -> (Vec<i128>, Vec<u64>, Vec<String>) {
        get_campaign(&e, campaign_id);
        let history: Vec<Contribution> = e
            .storage()
            .persistent()
            .get(&PersistentKey::Contributions(campaign_id, contributor))
            .unwrap_or_else(|| Vec::new(&e));

        let mut amounts = Vec::new(&e);
        let mut timestamps = Vec::new(&e);
        let mut messages = Vec::new(&e);
        for entry in history.iter() {
            amounts.push_back(entry.amount);
            timestamps.push_back(entry.timestamp);
            messages.push_back(entry.message);
        }
        (amounts, timestamps, messages)
    }

    pub fn get_requests_count(e: Env, campaign_id: CampaignId) -> RequestIndex {
        get_campaign(&e, campaign_id).requests_count
    }

    pub fn get_request(e: Env, campaign_id: CampaignId, index: RequestIndex) -> SpendingRequest {
        get_campaign(&e, campaign_id);
        get_request(&e, campaign_id, index)
    }

    /// Whether `who` has approved request `index`; false for unknown keys
    pub fn has_approved(
        e: Env,
        campaign_id: CampaignId,
        index: RequestIndex,
        who: Address,
    ) -> bool {
        e.storage()
            .persistent()
            .get(&PersistentKey::Approval(campaign_id, index, who))
            .unwrap_or(false)
    }
}

// Helper functions
fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

fn get_token(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Token)
        .unwrap_or_else(|| panic_with_error!(e, CampaignError::NotInitialized))
}

fn get_campaign(e: &Env, campaign_id: CampaignId) -> Campaign {
    e.storage()
        .persistent()
        .get(&PersistentKey::Campaign(campaign_id))
        .unwrap_or_else(|| panic_with_error!(e, CampaignError::CampaignNotFound))
}

fn save_campaign(e: &Env, campaign: &Campaign) {
    let key = PersistentKey::Campaign(campaign.id);
    e.storage().persistent().set(&key, campaign);
    extend_persistent(e, &key);
}

fn get_request(e: &Env, campaign_id: CampaignId, index: RequestIndex) -> SpendingRequest {
    e.storage()
        .persistent()
        .get(&PersistentKey::Request(campaign_id, index))
        .unwrap_or_else(|| panic_with_error!(e, CampaignError::RequestNotFound))
}

fn save_request(e: &Env, campaign_id: CampaignId, index: RequestIndex, request: &SpendingRequest) {
    let key = PersistentKey::Request(campaign_id, index);
    e.storage().persistent().set(&key, request);
    extend_persistent(e, &key);
}

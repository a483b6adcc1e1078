use soroban_sdk::{contracttype, Address, String, Symbol};

use crate::storage_types::{CampaignId, RequestIndex};

#[contracttype]
#[derive(Clone)]
pub struct CampaignCreatedEvent {
    pub campaign_id: CampaignId,
    pub manager: Address,
    pub target_amount: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct ContributionMadeEvent {
    pub campaign_id: CampaignId,
    pub contributor: Address,
    pub amount: i128,
    pub message: String,
}

#[contracttype]
#[derive(Clone)]
pub struct TargetReachedEvent {
    pub campaign_id: CampaignId,
    pub total_raised: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct RequestCreatedEvent {
    pub campaign_id: CampaignId,
    pub request_index: RequestIndex,
    pub amount: i128,
    pub recipient: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct RequestApprovedEvent {
    pub campaign_id: CampaignId,
    pub request_index: RequestIndex,
    pub approver: Address,
    pub approval_count: u32,
}

#[contracttype]
#[derive(Clone)]
pub struct RequestFinalizedEvent {
    pub campaign_id: CampaignId,
    pub request_index: RequestIndex,
    pub amount: i128,
    pub recipient: Address,
}

pub fn emit_campaign_created(env: &soroban_sdk::Env, event: CampaignCreatedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign_created"),),
        event,
    );
}

pub fn emit_contribution_made(env: &soroban_sdk::Env, event: ContributionMadeEvent) {
    env.events().publish(
        (Symbol::new(env, "contribution_made"),),
        event,
    );
}

pub fn emit_target_reached(env: &soroban_sdk::Env, event: TargetReachedEvent) {
    env.events().publish(
        (Symbol::new(env, "target_reached"),),
        event,
    );
}

pub fn emit_request_created(env: &soroban_sdk::Env, event: RequestCreatedEvent) {
    env.events().publish(
        (Symbol::new(env, "request_created"),),
        event,
    );
}

pub fn emit_request_approved(env: &soroban_sdk::Env, event: RequestApprovedEvent) {
    env.events().publish(
        (Symbol::new(env, "request_approved"),),
        event,
    );
}

pub fn emit_request_finalized(env: &soroban_sdk::Env, event: RequestFinalizedEvent) {
    env.events().publish(
        (Symbol::new(env, "request_finalized"),),
        event,
    );
}

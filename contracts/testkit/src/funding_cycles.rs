use soroban_sdk::{contract, contractimpl, contracttype, Env};
use treasury_shared::{FundingCycle, FundingCycleMetadata};

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Current(u64),
}

/// Serves whatever cycle a test configured; projects without one get cycle
/// number 0.
#[contract]
pub struct MockFundingCycleStore;

#[contractimpl]
impl MockFundingCycleStore {
    pub fn set_current_of(env: Env, project_id: u64, cycle: FundingCycle) {
        env.storage()
            .instance()
            .set(&DataKey::Current(project_id), &cycle);
    }

    /// Shorthand for a running cycle with the given weight and rules.
    pub fn set_cycle(
        env: Env,
        project_id: u64,
        configuration: u64,
        weight: i128,
        metadata: FundingCycleMetadata,
    ) {
        let cycle = FundingCycle {
            number: 1,
            configuration,
            based_on: 0,
            start: configuration,
            duration: 0,
            weight,
            discount_rate: 0,
            ballot: None,
            metadata: metadata.pack(),
            data_source: metadata.data_source.clone(),
        };
        Self::set_current_of(env, project_id, cycle);
    }

    pub fn current_of(env: Env, project_id: u64) -> FundingCycle {
        env.storage()
            .instance()
            .get(&DataKey::Current(project_id))
            .unwrap_or(FundingCycle {
                number: 0,
                configuration: 0,
                based_on: 0,
                start: 0,
                duration: 0,
                weight: 0,
                discount_rate: 0,
                ballot: None,
                metadata: 0,
                data_source: None,
            })
    }
}

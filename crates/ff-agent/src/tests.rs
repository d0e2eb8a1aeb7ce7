//! Unit tests for agent storage.

use ff_core::AgentId;

use crate::AgentStoreBuilder;

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn correct_count() {
        let (store, rngs) = AgentStoreBuilder::new(500, 1).build();
        assert_eq!(store.count, 500);
        assert_eq!(rngs.len(), 500);
    }

    #[test]
    fn zero_agents() {
        let (store, rngs) = AgentStoreBuilder::new(0, 0).build();
        assert!(store.is_empty());
        assert!(rngs.is_empty());
    }

    #[test]
    fn agents_start_at_given_position() {
        let (store, _) = AgentStoreBuilder::new(4, 0).start_position(12.5, 7.0).build();
        for agent in store.agent_ids() {
            assert_eq!(store.position(agent), (12.5, 7.0));
        }
    }

    #[test]
    fn role_assignment_is_deterministic_for_a_given_seed() {
        let (store_a, _) = AgentStoreBuilder::new(50, 42).build();
        let (store_b, _) = AgentStoreBuilder::new(50, 42).build();
        assert_eq!(store_a.role, store_b.role);
    }
}

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn agent_ids_iterator() {
        let (store, _) = AgentStoreBuilder::new(5, 0).build();
        let ids: Vec<AgentId> = store.agent_ids().collect();
        assert_eq!(
            ids,
            vec![AgentId(0), AgentId(1), AgentId(2), AgentId(3), AgentId(4)]
        );
    }

    #[test]
    fn set_position_overwrites() {
        let (mut store, _) = AgentStoreBuilder::new(2, 0).build();
        store.set_position(AgentId(1), 3.0, 4.0);
        assert_eq!(store.position(AgentId(1)), (3.0, 4.0));
        assert_eq!(store.position(AgentId(0)), (0.0, 0.0));
    }

    #[test]
    fn needs_start_empty() {
        let (store, _) = AgentStoreBuilder::new(1, 0).build();
        assert!(store.needs[0].is_empty());
    }

    #[test]
    fn memory_tail_returns_most_recent_lines() {
        let (mut store, _) = AgentStoreBuilder::new(1, 0).build();
        for i in 0..5 {
            store.push_memory(AgentId(0), format!("line {i}"));
        }
        let tail = store.memory_tail(AgentId(0), 2);
        assert_eq!(tail, ["line 3", "line 4"]);
    }

    #[test]
    fn memory_tail_shorter_than_n_returns_all_lines() {
        let (mut store, _) = AgentStoreBuilder::new(1, 0).build();
        store.push_memory(AgentId(0), "only line".to_string());
        assert_eq!(store.memory_tail(AgentId(0), 10), ["only line"]);
    }

    #[test]
    fn memory_log_drops_oldest_past_capacity() {
        let (mut store, _) = AgentStoreBuilder::new(1, 0).memory_capacity(3).build();
        for i in 0..5 {
            store.push_memory(AgentId(0), format!("line {i}"));
        }
        assert_eq!(store.memory_tail(AgentId(0), 10), ["line 2", "line 3", "line 4"]);
    }
}

#[cfg(test)]
mod rngs {
    use super::*;

    #[test]
    fn per_agent_determinism() {
        let (_, mut rngs1) = AgentStoreBuilder::new(10, 999).build();
        let (_, mut rngs2) = AgentStoreBuilder::new(10, 999).build();
        for i in 0..10u32 {
            let a: f32 = rngs1.get_mut(AgentId(i)).random();
            let b: f32 = rngs2.get_mut(AgentId(i)).random();
            assert_eq!(a, b, "agent {i} RNG should be deterministic");
        }
    }

    #[test]
    fn different_seeds_differ() {
        let (_, mut rngs_a) = AgentStoreBuilder::new(1, 1).build();
        let (_, mut rngs_b) = AgentStoreBuilder::new(1, 2).build();
        let a: u64 = rngs_a.get_mut(AgentId(0)).random();
        let b: u64 = rngs_b.get_mut(AgentId(0)).random();
        assert_ne!(a, b);
    }

    #[test]
    fn adjacent_agents_differ() {
        let (_, mut rngs) = AgentStoreBuilder::new(2, 0).build();
        let a: u64 = rngs.get_mut(AgentId(0)).random();
        let b: u64 = rngs.get_mut(AgentId(1)).random();
        assert_ne!(a, b);
    }
}

//! # Registry Lifecycle Flows
//!
//! A space's whole life: creation, the root revision, owner and community
//! submissions, moderation, and the events each step publishes.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use csr_content_registry::{
        ContentRegistryApi, InMemoryEventLog, InMemoryKvStore, PersonalMessageRecovery,
        RegistryConfig, RegistryError, RegistryEvent, RegistryService, RevisionState,
    };
    use shared_types::{Address, RevisionHash, SpaceId};

    type Registry = RegistryService<InMemoryKvStore, PersonalMessageRecovery, InMemoryEventLog>;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const OWNER: Address = Address::new([0x01; 20]);
    const ALICE: Address = Address::new([0xA1; 20]);
    const BOB: Address = Address::new([0xB0; 20]);

    fn registry() -> (Registry, InMemoryEventLog) {
        let log = InMemoryEventLog::new();
        let registry = RegistryService::new(
            InMemoryKvStore::new(),
            PersonalMessageRecovery::new(),
            log.clone(),
            RegistryConfig::new(Address::new([0xC5; 20])),
        );
        (registry, log)
    }

    fn space(name: &str) -> SpaceId {
        SpaceId::from_name(name).unwrap()
    }

    fn rev(hash: &str) -> RevisionHash {
        RevisionHash::new(hash).unwrap()
    }

    // =============================================================================
    // LIFECYCLE
    // =============================================================================

    #[test]
    fn test_full_moderation_workflow() {
        let (registry, log) = registry();
        let id = space("HelloWorld");

        registry.create_space(id, OWNER, OWNER).unwrap();
        registry.push_revision(id, rev("QmV1"), None, OWNER).unwrap();
        registry
            .push_revision(id, rev("QmV2"), Some(rev("QmV1")), OWNER)
            .unwrap();

        // Community submissions wait for the owner.
        let alice = registry
            .push_revision(id, rev("QmAlice"), Some(rev("QmV2")), ALICE)
            .unwrap();
        let bob = registry
            .push_revision(id, rev("QmBob"), Some(rev("QmV2")), BOB)
            .unwrap();
        assert_eq!(alice.state, RevisionState::Pending);
        assert_eq!(bob.state, RevisionState::Pending);
        assert_eq!(
            registry.get_space(&id).unwrap().unwrap().last_revision,
            Some(rev("QmV2"))
        );

        // A pending revision can already be built upon.
        registry
            .push_revision(id, rev("QmAliceFix"), Some(rev("QmAlice")), ALICE)
            .unwrap();

        registry.approve_revision(id, rev("QmAlice"), OWNER).unwrap();
        registry.reject_revision(id, rev("QmBob"), OWNER).unwrap();

        let space = registry.get_space(&id).unwrap().unwrap();
        assert_eq!(space.last_revision, Some(rev("QmAlice")));
        assert_eq!(space.root_revision, Some(rev("QmV1")));
        assert_eq!(space.revision_count, 5);

        let states: Vec<(String, RevisionState)> = registry
            .list_revisions(&id)
            .unwrap()
            .into_iter()
            .map(|r| (r.hash.to_string(), r.state))
            .collect();
        assert_eq!(
            states,
            vec![
                ("QmV1".to_string(), RevisionState::Published),
                ("QmV2".to_string(), RevisionState::Published),
                ("QmAlice".to_string(), RevisionState::Published),
                ("QmBob".to_string(), RevisionState::Rejected),
                ("QmAliceFix".to_string(), RevisionState::Pending),
            ]
        );

        let names: Vec<&str> = log.events().iter().map(RegistryEvent::name).collect();
        assert_eq!(
            names,
            vec![
                "SpaceCreated",
                "RevisionPublished",
                "RevisionPublished",
                "RevisionPending",
                "RevisionPending",
                "RevisionPending",
                "RevisionPublished",
                "RevisionRejected",
            ]
        );
    }

    #[test]
    fn test_terminal_states_are_final() {
        let (registry, _) = registry();
        let id = space("Final");
        registry.create_space(id, OWNER, OWNER).unwrap();
        registry.push_revision(id, rev("QmRoot"), None, OWNER).unwrap();
        registry
            .push_revision(id, rev("QmA"), Some(rev("QmRoot")), ALICE)
            .unwrap();
        registry.reject_revision(id, rev("QmA"), OWNER).unwrap();

        for result in [
            registry.approve_revision(id, rev("QmA"), OWNER),
            registry.reject_revision(id, rev("QmA"), OWNER),
            registry.approve_revision(id, rev("QmRoot"), OWNER),
        ] {
            assert!(matches!(result, Err(RegistryError::NotPending { .. })));
        }

        let rejected = registry.get_revision(&id, &rev("QmA")).unwrap().unwrap();
        assert_eq!(rejected.state, RevisionState::Rejected);
        assert_eq!(
            registry.get_space(&id).unwrap().unwrap().last_revision,
            Some(rev("QmRoot"))
        );
    }

    #[test]
    fn test_spaces_are_isolated() {
        let (registry, _) = registry();
        registry.create_space(space("One"), OWNER, OWNER).unwrap();
        registry.create_space(space("Two"), ALICE, OWNER).unwrap();
        registry
            .push_revision(space("One"), rev("QmShared"), None, OWNER)
            .unwrap();

        // Same hash is a fresh revision in another space.
        let other = registry
            .push_revision(space("Two"), rev("QmShared"), None, OWNER)
            .unwrap();
        assert_eq!(other.state, RevisionState::Pending);

        // Parents never cross spaces.
        assert!(matches!(
            registry.push_revision(space("Two"), rev("QmNext"), Some(rev("QmMissing")), ALICE),
            Err(RegistryError::ParentNotFound { .. })
        ));

        // The owner of one space has no authority over another.
        assert!(matches!(
            registry.approve_revision(space("Two"), rev("QmShared"), OWNER),
            Err(RegistryError::Unauthorized { .. })
        ));
        registry
            .approve_revision(space("Two"), rev("QmShared"), ALICE)
            .unwrap();
    }

    // =============================================================================
    // CONCURRENT CALLERS
    // =============================================================================

    #[test]
    fn test_racing_creations_have_one_winner() {
        let (registry, _) = registry();
        let registry = Arc::new(registry);
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    let caller = Address::new([i + 1; 20]);
                    barrier.wait();
                    registry.create_space(space("Contested"), caller, caller)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1);
        assert!(results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| matches!(r, Err(RegistryError::AlreadyExists { .. }))));

        let stored = registry.get_space(&space("Contested")).unwrap().unwrap();
        assert_eq!(stored.owner, winners[0].owner);
    }

    #[test]
    fn test_racing_roots_have_one_winner() {
        let (registry, _) = registry();
        registry.create_space(space("Roots"), OWNER, OWNER).unwrap();
        let registry = Arc::new(registry);
        let barrier = Arc::new(Barrier::new(6));

        let handles: Vec<_> = (0..6u8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    registry.push_revision(
                        space("Roots"),
                        rev(&format!("QmRoot{i}")),
                        None,
                        Address::new([i + 1; 20]),
                    )
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(RegistryError::RootAlreadyExists { .. })))
                .count(),
            5
        );
        assert_eq!(registry.list_revisions(&space("Roots")).unwrap().len(), 1);
    }
}

//! # Delegated Creation
//!
//! An owner signs `(space, owner, nonce)` off-path; a relayer submits it.
//!
//! ## Attacks Covered
//!
//! 1. **Replay**: the same signature submitted twice
//! 2. **Impersonation**: a signature by someone other than the named owner
//! 3. **Cross-deployment replay**: a signature made for another registry address
//! 4. **Malleability**: the high-S twin of a valid signature
//! 5. **Nonce burning**: a failed creation must not consume the nonce

#[cfg(test)]
mod tests {
    use csr_content_registry::{
        creation_digest, ContentRegistryApi, InMemoryEventLog, InMemoryKvStore,
        PersonalMessageRecovery, RegistryConfig, RegistryError, RegistryEvent, RegistryService,
    };
    use csr_signature_verification::test_helpers::{
        address_of, generate_keypair, keypair_from_seed, sign, sign_personal,
    };
    use csr_signature_verification::{invert_s, recover_personal_signer, EcdsaSignature};
    use k256::ecdsa::SigningKey;
    use rand::Rng;
    use shared_types::{Address, SpaceId};

    type Registry = RegistryService<InMemoryKvStore, PersonalMessageRecovery, InMemoryEventLog>;

    const REGISTRY: Address = Address::new([0xC5; 20]);
    const RELAYER: Address = Address::new([0xEE; 20]);

    fn registry_at(address: Address) -> (Registry, InMemoryEventLog) {
        let log = InMemoryEventLog::new();
        let registry = RegistryService::new(
            InMemoryKvStore::new(),
            PersonalMessageRecovery::new(),
            log.clone(),
            RegistryConfig::new(address),
        );
        (registry, log)
    }

    fn space(name: &str) -> SpaceId {
        SpaceId::from_name(name).unwrap()
    }

    /// Signature an owner hands to a relayer.
    fn authorize(registry: &Registry, key: &SigningKey, id: &SpaceId, nonce: u64) -> Vec<u8> {
        let digest = registry.creation_digest(id, &address_of(key), nonce);
        sign_personal(&digest, key).to_bytes().to_vec()
    }

    #[test]
    fn test_relayed_creation_with_fresh_key() {
        let (registry, log) = registry_at(REGISTRY);
        let (key, _) = generate_keypair();
        let owner = address_of(&key);
        let id = space("Relayed");

        let signature = authorize(&registry, &key, &id, 0);
        let created = registry
            .delegated_create_space(id, owner, 0, &signature, RELAYER)
            .unwrap();

        assert_eq!(created.owner, owner);
        assert_eq!(registry.nonce_of(&owner).unwrap(), 1);
        assert_eq!(registry.nonce_of(&RELAYER).unwrap(), 0);
        assert_eq!(
            log.events(),
            vec![
                RegistryEvent::SpaceCreated {
                    space_id: id,
                    owner,
                    relayed_by: Some(RELAYER),
                },
                RegistryEvent::NonceConsumed {
                    identity: owner,
                    nonce: 0,
                },
            ]
        );

        // The signer owns the space like a direct creator would.
        registry
            .push_revision(id, "QmRoot".parse().unwrap(), None, owner)
            .unwrap();
        assert!(registry.get_space(&id).unwrap().unwrap().last_revision.is_some());
    }

    #[test]
    fn test_sequential_nonces() {
        let (registry, _) = registry_at(REGISTRY);
        let key = keypair_from_seed(3);
        let owner = address_of(&key);

        for (nonce, name) in ["First", "Second", "Third"].iter().enumerate() {
            let nonce = nonce as u64;
            let id = space(name);
            let signature = authorize(&registry, &key, &id, nonce);
            registry
                .delegated_create_space(id, owner, nonce, &signature, RELAYER)
                .unwrap();
        }
        assert_eq!(registry.nonce_of(&owner).unwrap(), 3);
    }

    #[test]
    fn test_replay_rejected() {
        let (registry, _) = registry_at(REGISTRY);
        let key = keypair_from_seed(4);
        let owner = address_of(&key);
        let id = space("Once");

        let signature = authorize(&registry, &key, &id, 0);
        registry
            .delegated_create_space(id, owner, 0, &signature, RELAYER)
            .unwrap();

        let replay = registry.delegated_create_space(id, owner, 0, &signature, RELAYER);
        assert_eq!(
            replay,
            Err(RegistryError::NonceMismatch {
                expected: 1,
                provided: 0,
            })
        );

        // Replaying under the next nonce breaks the digest instead.
        let shifted = registry.delegated_create_space(space("Other"), owner, 1, &signature, RELAYER);
        assert!(matches!(shifted, Err(RegistryError::InvalidSignature { .. })));
        assert_eq!(registry.nonce_of(&owner).unwrap(), 1);
    }

    #[test]
    fn test_wrong_signer_rejected() {
        let (registry, log) = registry_at(REGISTRY);
        let owner_key = keypair_from_seed(5);
        let mallory = keypair_from_seed(6);
        let owner = address_of(&owner_key);
        let id = space("Stolen");

        // Mallory signs the owner's digest.
        let digest = registry.creation_digest(&id, &owner, 0);
        let forged = sign_personal(&digest, &mallory).to_bytes();

        let result = registry.delegated_create_space(id, owner, 0, &forged, RELAYER);
        assert!(matches!(result, Err(RegistryError::InvalidSignature { .. })));
        assert!(registry.get_space(&id).unwrap().is_none());
        assert_eq!(registry.nonce_of(&owner).unwrap(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_raw_digest_signature_rejected() {
        let (registry, _) = registry_at(REGISTRY);
        let key = keypair_from_seed(7);
        let owner = address_of(&key);
        let id = space("Raw");

        // Signed without the personal-message envelope.
        let digest = registry.creation_digest(&id, &owner, 0);
        let raw = sign(&digest, &key).to_bytes();

        assert!(matches!(
            registry.delegated_create_space(id, owner, 0, &raw, RELAYER),
            Err(RegistryError::InvalidSignature { .. })
        ));
    }

    #[test]
    fn test_cross_registry_replay_rejected() {
        let (registry_a, _) = registry_at(REGISTRY);
        let (registry_b, _) = registry_at(Address::new([0xC6; 20]));
        let key = keypair_from_seed(8);
        let owner = address_of(&key);
        let id = space("Portable");

        let signature = authorize(&registry_a, &key, &id, 0);
        assert!(matches!(
            registry_b.delegated_create_space(id, owner, 0, &signature, RELAYER),
            Err(RegistryError::InvalidSignature { .. })
        ));
        registry_a
            .delegated_create_space(id, owner, 0, &signature, RELAYER)
            .unwrap();
    }

    #[test]
    fn test_high_s_twin_rejected() {
        let (registry, _) = registry_at(REGISTRY);
        let key = keypair_from_seed(10);
        let owner = address_of(&key);
        let id = space("Malleable");

        let digest = registry.creation_digest(&id, &owner, 0);
        let valid = sign_personal(&digest, &key);
        assert_eq!(recover_personal_signer(&digest, &valid).unwrap(), owner);

        // (r, n - s, v ^ 1) recovers the same key but must be refused.
        let twin = EcdsaSignature {
            r: valid.r,
            s: invert_s(&valid.s),
            v: if valid.v == 27 { 28 } else { 27 },
        };
        assert!(matches!(
            registry.delegated_create_space(id, owner, 0, &twin.to_bytes(), RELAYER),
            Err(RegistryError::InvalidSignature { .. })
        ));
        assert_eq!(registry.nonce_of(&owner).unwrap(), 0);
    }

    #[test]
    fn test_failed_creation_keeps_nonce() {
        let (registry, _) = registry_at(REGISTRY);
        let key = keypair_from_seed(11);
        let owner = address_of(&key);
        let id = space("Taken");

        registry.create_space(id, RELAYER, RELAYER).unwrap();

        let signature = authorize(&registry, &key, &id, 0);
        assert_eq!(
            registry.delegated_create_space(id, owner, 0, &signature, RELAYER),
            Err(RegistryError::AlreadyExists { space_id: id })
        );
        assert_eq!(registry.nonce_of(&owner).unwrap(), 0);

        // Nonce 0 is still usable for another space.
        let other = space("Free");
        let signature = authorize(&registry, &key, &other, 0);
        registry
            .delegated_create_space(other, owner, 0, &signature, RELAYER)
            .unwrap();
        assert_eq!(registry.nonce_of(&owner).unwrap(), 1);
    }

    #[test]
    fn test_corrupted_signatures_rejected() {
        let (registry, _) = registry_at(REGISTRY);
        let key = keypair_from_seed(12);
        let owner = address_of(&key);
        let id = space("Noise");
        let signature = authorize(&registry, &key, &id, 0);
        let mut rng = rand::thread_rng();

        for _ in 0..16 {
            let mut corrupted = signature.clone();
            let index: usize = rng.gen_range(0..64);
            let bit: u8 = 1 << rng.gen_range(0..8u32);
            corrupted[index] ^= bit;
            assert!(matches!(
                registry.delegated_create_space(id, owner, 0, &corrupted, RELAYER),
                Err(RegistryError::InvalidSignature { .. })
            ));
        }

        for length in [0usize, 64, 66] {
            let mut wrong = signature.clone();
            wrong.resize(length, 0);
            assert!(matches!(
                registry.delegated_create_space(id, owner, 0, &wrong, RELAYER),
                Err(RegistryError::InvalidSignature { .. })
            ));
        }
        assert_eq!(registry.nonce_of(&owner).unwrap(), 0);
    }

    #[test]
    fn test_digest_matches_free_function() {
        let (registry, _) = registry_at(REGISTRY);
        let owner = Address::new([0x42; 20]);
        let id = space("Digest");

        assert_eq!(
            registry.creation_digest(&id, &owner, 9),
            creation_digest(&REGISTRY, &id, &owner, 9)
        );
        assert_ne!(
            registry.creation_digest(&id, &owner, 9),
            registry.creation_digest(&id, &owner, 10)
        );
    }
}

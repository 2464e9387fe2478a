//! # Content-Space Registry Benchmarks
//!
//! | Area | Operation | Target |
//! |------|-----------|--------|
//! | Signature | personal-message signer recovery | < 1ms |
//! | Space Directory | create + lookup | < 50µs |
//! | Revision Ledger | owner push on a long chain | < 50µs |
//! | Delegation | full delegated creation | < 1ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use csr_content_registry::{
    ContentRegistryApi, InMemoryKvStore, NoopEventPublisher, PersonalMessageRecovery,
    RegistryConfig, RegistryService,
};
use csr_signature_verification::recover_personal_signer;
use csr_signature_verification::test_helpers::{address_of, keypair_from_seed, sign_personal};
use shared_types::{Address, RevisionHash, SpaceId};
use std::time::Duration;

type Registry = RegistryService<InMemoryKvStore, PersonalMessageRecovery, NoopEventPublisher>;

fn registry() -> Registry {
    RegistryService::new(
        InMemoryKvStore::new(),
        PersonalMessageRecovery::new(),
        NoopEventPublisher,
        RegistryConfig::new(Address::new([0xC5; 20])),
    )
}

fn space(i: u64) -> SpaceId {
    SpaceId::from_name(format!("space-{i}")).unwrap()
}

// ============================================================================
// Signature recovery
// ============================================================================

fn bench_signer_recovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("csr-signature");
    group.measurement_time(Duration::from_secs(10));

    let key = keypair_from_seed(1);
    let registry = registry();
    let digest = registry.creation_digest(&space(0), &address_of(&key), 0);
    let signature = sign_personal(&digest, &key);

    group.bench_function("recover_personal_signer", |b| {
        b.iter(|| black_box(recover_personal_signer(&digest, &signature).is_ok()))
    });

    group.finish();
}

// ============================================================================
// Space Directory and Revision Ledger
// ============================================================================

fn bench_registry_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("csr-registry");
    let owner = Address::new([1u8; 20]);

    group.bench_function("create_space", |b| {
        let registry = registry();
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            black_box(registry.create_space(space(i), owner, owner).is_ok())
        })
    });

    for chain in [100u64, 1_000] {
        let registry = registry();
        let id = space(0);
        registry.create_space(id, owner, owner).unwrap();
        let mut parent: Option<RevisionHash> = None;
        for n in 0..chain {
            let hash = RevisionHash::new(format!("Qm{n}")).unwrap();
            registry
                .push_revision(id, hash.clone(), parent.take(), owner)
                .unwrap();
            parent = Some(hash);
        }

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("push_on_chain", chain), &chain, |b, _| {
            let mut n = chain;
            b.iter(|| {
                let hash = RevisionHash::new(format!("Qm{n}")).unwrap();
                let result = registry.push_revision(id, hash.clone(), parent.clone(), owner);
                parent = Some(hash);
                n += 1;
                black_box(result.is_ok())
            })
        });
    }

    group.finish();
}

// ============================================================================
// Delegated creation
// ============================================================================

fn bench_delegated_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("csr-delegation");
    group.measurement_time(Duration::from_secs(10));

    let key = keypair_from_seed(2);
    let owner = address_of(&key);
    let relayer = Address::new([0xEE; 20]);

    group.bench_function("delegated_create_space", |b| {
        let registry = registry();
        let mut nonce = 0u64;
        b.iter(|| {
            let id = space(nonce);
            let digest = registry.creation_digest(&id, &owner, nonce);
            let signature = sign_personal(&digest, &key).to_bytes();
            let result = registry.delegated_create_space(id, owner, nonce, &signature, relayer);
            nonce += 1;
            black_box(result.is_ok())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_signer_recovery,
    bench_registry_operations,
    bench_delegated_creation,
);

criterion_main!(benches);

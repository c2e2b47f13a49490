//! # Supernode Hunter Benchmarks
//!
//! | Path | Work per call |
//! |------|---------------|
//! | Node list decode | bencode decode + per-entry key hashing + splice |
//! | Discovery cycle | cursor step + query construction |
//! | Reply handling | node list decode + pool insertion |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::seq::SliceRandom;
use rand::SeedableRng;

use mesh_supernode_hunter::domain::parse_node_list;
use mesh_supernode_hunter::test_utils::{nodes_reply, overlay_addr, overlay_ip};
use mesh_supernode_hunter::{
    AddrSet, Address, Dict, HunterConfig, QueryCompletion, QueryReply, SupernodeHunter,
};

fn bench_node_list_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("node-list-decode");
    let from = overlay_addr(0, 0x13);

    for size in [1usize, 8, 32] {
        let nodes: Vec<Address> = (1..=size).map(|i| overlay_addr(i, 0x15)).collect();
        let wire = nodes_reply(&nodes).encode();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("decode_and_splice", size), &wire, |b, wire| {
            b.iter(|| {
                let reply = Dict::decode(black_box(wire)).unwrap();
                black_box(parse_node_list(&from, &reply, true).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_discovery_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("discovery-cycle");
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let mut indices: Vec<usize> = (1..40).collect();
    indices.shuffle(&mut rng);
    let peers: AddrSet = indices.iter().map(|&i| overlay_addr(i, 0x13)).collect();

    let mut hunter = SupernodeHunter::new(overlay_addr(0, 1), HunterConfig::default());
    hunter.add_supernode(overlay_ip(50)).unwrap();
    hunter.add_supernode(overlay_ip(51)).unwrap();

    group.bench_function("on_cycle", |b| b.iter(|| black_box(hunter.on_cycle(&peers))));
    group.finish();
}

fn bench_get_peers_reply(c: &mut Criterion) {
    let mut group = c.benchmark_group("reply-handling");
    let peers: AddrSet = [overlay_addr(1, 0x13)].into_iter().collect();
    let learned: Vec<Address> = (2..34).map(|i| overlay_addr(i, 0x15)).collect();
    let message = nodes_reply(&learned);

    let mut hunter = SupernodeHunter::new(overlay_addr(0, 1), HunterConfig::default());
    hunter.add_supernode(overlay_ip(50)).unwrap();
    hunter.on_cycle(&peers);
    let Some(gp) = hunter.on_cycle(&peers) else {
        return;
    };

    group.bench_function("get_peers_32_nodes", |b| {
        b.iter(|| {
            let completion = QueryCompletion {
                context: gp.context.clone(),
                reply: QueryReply::Reply {
                    message: message.clone(),
                    responder: *gp.target(),
                },
            };
            black_box(hunter.on_reply(completion))
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_node_list_decode,
    bench_discovery_cycle,
    bench_get_peers_reply
);
criterion_main!(benches);

// Criterion benchmarks for Relay Pair

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use relay_pair::core::{build_context, score_pairs, PairingEngine};
use relay_pair::models::{Member, MemberStatus, MeetingRecord, MeetingState, Rule};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap()
}

fn create_member(id: usize) -> Member {
    let industries = ["fintech", "health", "media", "climate"];
    Member {
        member_id: format!("m{:04}", id),
        name: format!("Member {}", id),
        joined_at: now() - Duration::days(30 + (id as i64 * 13) % 1500),
        industry: Some(industries[id % industries.len()].to_string()),
        expertise: vec![format!("skill-{}", id % 7), format!("skill-{}", id % 11)],
        looking_for: vec![format!("skill-{}", (id + 3) % 7)],
        can_help_with: vec![format!("skill-{}", id % 5)],
        status: MemberStatus::Active,
    }
}

fn create_meetings(member_count: usize) -> Vec<MeetingRecord> {
    // Roughly one completed meeting per member, spread over the past year
    (0..member_count)
        .map(|i| {
            let a = format!("m{:04}", i);
            let b = format!("m{:04}", (i + 1) % member_count);
            let days_ago = 10 + (i as i64 * 17) % 360;
            MeetingRecord {
                meeting_id: format!("mt{}", i),
                member_a: a,
                member_b: b,
                state: MeetingState::Closed,
                created_at: now() - Duration::days(days_ago + 1),
                completed_at: Some(now() - Duration::days(days_ago)),
            }
        })
        .collect()
}

fn rule_set() -> Vec<Rule> {
    vec![
        Rule::new("meeting_history", 1.0),
        Rule::new("industry_diversity", 0.6),
        Rule::new("expertise_complementarity", 0.8),
        Rule::new("needs_alignment", 1.2),
        Rule::new("load_balance", 0.5),
        Rule::new("responsiveness", 0.4),
        Rule::new("recent_meeting_penalty", -1.5),
    ]
}

fn bench_context_aggregation(c: &mut Criterion) {
    let meetings = create_meetings(500);

    c.bench_function("build_context_500_meetings", |b| {
        b.iter(|| build_context(black_box(&meetings), black_box(&[])));
    });
}

fn bench_pair_scoring(c: &mut Criterion) {
    let rules = rule_set();

    let mut group = c.benchmark_group("scoring");

    for member_count in [10, 50, 100, 250].iter() {
        let members: Vec<Member> = (0..*member_count).map(create_member).collect();
        let meetings = create_meetings(*member_count);
        let ctx = build_context(&meetings, &[]);

        group.bench_with_input(
            BenchmarkId::new("score_pairs", member_count),
            member_count,
            |b, _| {
                b.iter(|| {
                    score_pairs(
                        black_box(&members),
                        black_box(&rules),
                        black_box(&ctx),
                        black_box(now()),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_full_cycle(c: &mut Criterion) {
    let engine = PairingEngine::with_defaults();
    let members: Vec<Member> = (0..100).map(create_member).collect();
    let meetings = create_meetings(100);
    let rules = rule_set();

    c.bench_function("run_cycle_100_members", |b| {
        b.iter(|| {
            engine.run_cycle(
                black_box(&members),
                black_box(&meetings),
                black_box(&[]),
                black_box(&rules),
                black_box(now()),
                black_box(25),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_context_aggregation,
    bench_pair_scoring,
    bench_full_cycle
);

criterion_main!(benches);

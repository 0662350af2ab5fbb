use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chainsim::disc::DiscTemplate;
use chainsim::mlcp::PgsSolver;
use chainsim::scenario::Scenario;
use chainsim::{Simulator, V2};

fn bench_default_scenario(c: &mut Criterion) {
	c.bench_function("default_chain_60_steps", |b| {
		b.iter(|| {
			let mut sim = Simulator::default();
			for _ in 0..60 {
				sim.update(1.0 / 60.0, V2::new(0.0, -1.0), 0.5);
			}
			sim.kinetic_energy()
		});
	});
}

fn bench_long_chain(c: &mut Criterion) {
	let discs = (0..40)
		.map(|idx| DiscTemplate::new(0.05, 0.015, [-0.6 + 0.03 * idx as f32, 0.0]))
		.collect();
	let scenario = Scenario::chain(discs);
	c.bench_function("chain_40_discs_60_steps", |b| {
		b.iter(|| {
			let mut sim = Simulator::from_scenario(&scenario).unwrap();
			for _ in 0..60 {
				sim.update(1.0 / 60.0, V2::new(0.0, -1.0), 1.0);
			}
			sim.kinetic_energy()
		});
	});
}

fn bench_pgs(c: &mut Criterion) {
	let n = 32;
	let mut solver = PgsSolver::<f64>::default();
	c.bench_function("pgs_tridiagonal_32", |b| {
		b.iter(|| {
			solver.prepare(n);
			for i in 0..n {
				solver.set_m(i, i, 2.0);
				if i + 1 < n {
					solver.set_m(i, i + 1, -1.0);
					solver.set_m(i + 1, i, -1.0);
				}
				solver.set_q(i, -1.0);
				solver.set_unilateral_limits(i);
			}
			solver.run();
			black_box(solver.z(n / 2))
		});
	});
}

criterion_group!(benches, bench_default_scenario, bench_long_chain, bench_pgs);
criterion_main!(benches);

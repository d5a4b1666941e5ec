use criterion::{Criterion, criterion_group, criterion_main};
use RustedAlgebra::symbolic::expression::{Expression, ExpressionD};
use RustedAlgebra::symbolic::variable::Variable;

fn bench_expand_trinomial_pow(c: &mut Criterion) {
    let x = Variable::new("x");
    let y = Variable::new("y");
    let base: ExpressionD =
        Expression::from(&x) + Expression::from(&y) + Expression::new_constant(1.0);
    let e = base.pow(Expression::new_constant(8.0));
    c.bench_function("expand (x + y + 1)^8", |b| b.iter(|| e.expand().unwrap()));
}

fn bench_eager_sum_simplification(c: &mut Criterion) {
    let x = Variable::new("x");
    c.bench_function("accumulate 100 scaled terms", |b| {
        b.iter(|| {
            let mut acc = ExpressionD::zero();
            for i in 0..100 {
                acc = acc + Expression::new_constant(i as f64) * Expression::from(&x);
            }
            acc
        })
    });
}

criterion_group!(benches, bench_expand_trinomial_pow, bench_eager_sum_simplification);
criterion_main!(benches);

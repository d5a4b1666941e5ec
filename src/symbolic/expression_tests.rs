use crate::symbolic::expression::{Expression, ExpressionD, ExpressionI, ExpressionKind};
use crate::symbolic::variable::Variable;

//___________________________________TESTS____________________________________

mod tests {
    use super::*;

    fn var(v: &Variable) -> ExpressionD {
        Expression::from(v)
    }

    #[test]
    fn test_kinds_and_predicates() {
        let x = Variable::new("x");
        let y = Variable::new("y");

        let c = ExpressionD::new_constant(3.0);
        assert_eq!(c.kind(), ExpressionKind::Constant);
        assert!(c.is_constant() && c.is_leaf());
        assert!(c.is_constant_value(&3.0));
        assert!(!c.is_constant_value(&4.0));

        let v = var(&x);
        assert_eq!(v.kind(), ExpressionKind::Var);
        assert!(v.is_variable() && v.is_leaf());
        assert!(v.variable().equal_to(&x));

        let sum = var(&x) + var(&y);
        assert_eq!(sum.kind(), ExpressionKind::Add);
        assert!(sum.is_addition());

        let product = var(&x) * var(&y) * ExpressionD::new_constant(2.0);
        assert_eq!(product.kind(), ExpressionKind::Mul);
        assert!(product.is_multiplication());

        let quotient = var(&x) / var(&y);
        assert_eq!(quotient.kind(), ExpressionKind::Div);
        assert!(quotient.is_division());

        let power = var(&x).pow(var(&y));
        assert_eq!(power.kind(), ExpressionKind::Pow);
        assert!(power.is_pow());

        let nan = ExpressionD::nan();
        assert_eq!(nan.kind(), ExpressionKind::NaN);
        assert!(nan.is_nan() && nan.is_leaf());
    }

    #[test]
    fn test_structural_vs_extensional_equality() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        // 2 * (x + y) and 2x + 2y are extensionally equal but structurally
        // distinct until both are expanded
        let e1 = ExpressionD::new_constant(2.0) * (var(&x) + var(&y));
        let e2 = ExpressionD::new_constant(2.0) * var(&x)
            + ExpressionD::new_constant(2.0) * var(&y);
        assert!(!e1.equal_to(&e2));
        assert!(e1.expand().unwrap().equal_to(&e2.expand().unwrap()));
        // reflexive on a non-NaN expression
        assert!(e1.equal_to(&e1));
        assert!(e1.equal_to(&e1.clone()));
    }

    #[test]
    fn test_singleton_sharing() {
        let z1 = ExpressionD::zero();
        let z2 = ExpressionD::zero();
        assert!(z1.same_cell(&z2));
        assert!(z1.use_count() > 1);
        assert!(ExpressionD::one().same_cell(&ExpressionD::one()));
        assert!(ExpressionD::nan().same_cell(&ExpressionD::nan()));
        // new_constant routes 0 and 1 to the singletons
        assert!(ExpressionD::new_constant(0.0).same_cell(&z1));
        assert!(ExpressionD::new_constant(1.0).same_cell(&ExpressionD::one()));
        // singletons of different scalar types are independent registries
        assert!(ExpressionI::zero().same_cell(&ExpressionI::zero()));
    }

    #[test]
    fn test_mathematical_constant_singletons() {
        assert_eq!(ExpressionD::pi().constant(), std::f64::consts::PI);
        assert_eq!(ExpressionD::e().constant(), std::f64::consts::E);
        assert!(ExpressionD::pi().same_cell(&ExpressionD::pi()));
        // truncated into integer scalars
        assert_eq!(ExpressionI::pi().constant(), 3);
        assert_eq!(ExpressionI::e().constant(), 2);
    }

    #[test]
    fn test_nan_is_never_equal() {
        let nan = ExpressionD::nan();
        assert!(!nan.equal_to(&nan));
        assert!(!nan.equal_to(&ExpressionD::nan()));
        assert!(!nan.equal_to(&ExpressionD::zero()));
        // the sentinel is still one shared cell
        assert!(nan.same_cell(&ExpressionD::nan()));
    }

    #[test]
    fn test_default_is_zero() {
        let e = ExpressionD::default();
        assert!(e.is_constant_value(&0.0));
        assert!(e.same_cell(&ExpressionD::zero()));
    }

    #[test]
    #[should_panic(expected = "dummy variable")]
    fn test_dummy_variable_is_rejected() {
        let _ = ExpressionD::new_variable(Variable::default());
    }

    #[test]
    fn test_typed_accessors() {
        let x = Variable::new("x");
        let y = Variable::new("y");

        let sum = var(&x) + var(&y) + ExpressionD::new_constant(5.0);
        let terms = sum.expression_to_coeff_map();
        assert_eq!(terms.len(), 2);
        assert!(terms.values().all(|c| *c == 1.0));

        let product = ExpressionD::new_constant(2.0) * var(&x) * var(&y);
        let factors = product.base_to_exponent_map();
        assert_eq!(factors.len(), 2);
        assert!(factors.values().all(|e| e.is_constant_value(&1.0)));

        let quotient = var(&x) / var(&y);
        assert!(quotient.lhs().equal_to(&var(&x)));
        assert!(quotient.rhs().equal_to(&var(&y)));
    }

    #[test]
    #[should_panic(expected = "constant() called on a Var expression")]
    fn test_constant_accessor_requires_constant_cell() {
        let x = Variable::new("x");
        let _ = var(&x).constant();
    }

    #[test]
    #[should_panic(expected = "expression_to_coeff_map() called on a Constant expression")]
    fn test_coeff_map_accessor_requires_addition_cell() {
        let _ = ExpressionD::new_constant(1.0).expression_to_coeff_map();
    }

    #[test]
    fn test_total_order() {
        let x = Variable::new("x");
        let y = Variable::new("y");

        // constants order by value
        assert!(ExpressionD::new_constant(2.0).less(&ExpressionD::new_constant(3.0)));
        assert!(!ExpressionD::new_constant(3.0).less(&ExpressionD::new_constant(2.0)));

        // kind is the major key: Constant < Var < Add < Mul < Div < Pow
        assert!(ExpressionD::new_constant(99.0).less(&var(&x)));
        assert!(var(&x).less(&(var(&x) + var(&y))));
        assert!((var(&x) + var(&y)).less(&(ExpressionD::new_constant(2.0) * var(&x) * var(&y))));

        // variables order by id
        assert!(var(&x).less(&var(&y)));

        // the order is strict: an expression is not less than itself
        let e = var(&x) + var(&y);
        assert!(!e.less(&e.clone()));
    }

    #[test]
    fn test_variables_are_memoized_union() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let z = Variable::new("z");

        let e = (var(&x) + var(&y)) * var(&z);
        let vars = e.variables();
        assert_eq!(vars.len(), 3);
        assert!(vars.contains(&x) && vars.contains(&y) && vars.contains(&z));
        // second call returns the memoized set
        assert_eq!(e.variables(), vars);

        assert!(ExpressionD::new_constant(4.0).variables().is_empty());
        let power = var(&x).pow(var(&y));
        assert_eq!(power.variables().len(), 2);
    }

    #[test]
    fn test_is_polynomial() {
        let x = Variable::new("x");
        let y = Variable::new("y");

        assert!(ExpressionD::new_constant(3.0).is_polynomial());
        assert!(var(&x).is_polynomial());
        assert!((var(&x) + var(&y)).is_polynomial());
        assert!((ExpressionD::new_constant(2.0) * var(&x) * var(&y)).is_polynomial());
        assert!(var(&x).pow(ExpressionD::new_constant(2.0)).is_polynomial());
        // negative and non-integer exponents break polynomiality
        assert!(!var(&x).pow(ExpressionD::new_constant(-1.0)).is_polynomial());
        assert!(!var(&x).pow(ExpressionD::new_constant(0.5)).is_polynomial());
        assert!(!var(&x).pow(var(&y)).is_polynomial());
        // division is never polynomial-preserving
        assert!(!(var(&x) / var(&y)).is_polynomial());
        assert!(!ExpressionD::nan().is_polynomial());
    }

    #[test]
    fn test_display_addition() {
        let x = Variable::new("x");
        let y = Variable::new("y");

        let e = ExpressionD::new_constant(1.0) + ExpressionD::new_constant(2.0) * var(&x);
        assert_eq!(e.to_string(), "(1 + 2 * x)");

        let e = ExpressionD::new_constant(1.0) - ExpressionD::new_constant(2.0) * var(&x);
        assert_eq!(e.to_string(), "(1 - 2 * x)");

        let e = var(&x) - var(&y);
        assert_eq!(e.to_string(), "(x - y)");

        let e = -(var(&x) + var(&y));
        assert_eq!(e.to_string(), "(-x - y)");
    }

    #[test]
    fn test_display_multiplication_division_pow() {
        let x = Variable::new("x");
        let y = Variable::new("y");

        let e = ExpressionD::new_constant(2.0) * var(&x) * var(&y);
        assert_eq!(e.to_string(), "(2 * x * y)");

        let e = var(&x) * var(&y);
        assert_eq!(e.to_string(), "(x * y)");

        let e = ExpressionD::new_constant(3.0) * var(&x).pow(ExpressionD::new_constant(2.0));
        assert_eq!(e.to_string(), "(3 * pow(x, 2))");

        let e = var(&x).pow(var(&y));
        assert_eq!(e.to_string(), "pow(x, y)");

        let e = var(&x) / var(&y);
        assert_eq!(e.to_string(), "(x / y)");

        assert_eq!(ExpressionD::nan().to_string(), "NaN");
        assert_eq!(ExpressionD::new_constant(2.5).to_string(), "2.5");
        assert_eq!(var(&x).to_string(), "x");
    }

    #[test]
    fn test_expanded_flag_detection() {
        let x = Variable::new("x");
        let y = Variable::new("y");

        // leaves and flat polynomial forms are detected as expanded
        assert!(ExpressionD::new_constant(42.0).is_expanded());
        assert!(var(&x).is_expanded());
        assert!((-var(&x)).is_expanded());
        assert!((ExpressionD::new_constant(3.0) * var(&x)).is_expanded());
        assert!((var(&x) + var(&y)).is_expanded());
        assert!((ExpressionD::new_constant(3.0) * var(&x) * var(&y)).is_expanded());
        assert!((ExpressionD::new_constant(-7.0) + var(&x) + var(&y)).is_expanded());
        assert!(var(&x).pow(var(&y)).is_expanded());
        assert!(var(&x).pow(ExpressionD::new_constant(-1.0)).is_expanded());
        assert!((ExpressionD::new_constant(2.0) * var(&x).pow(var(&y))).is_expanded());

        // forms that still need distribution are conservatively not expanded
        assert!(!(ExpressionD::new_constant(2.0) * (var(&x) + var(&y))).is_expanded());
        assert!(!(var(&x) + var(&y)).pow(ExpressionD::new_constant(2.0)).is_expanded());
        assert!(!(var(&x) + var(&y)).pow(ExpressionD::new_constant(-1.0)).is_expanded());
        assert!(!(var(&x) / var(&y)).is_expanded());
        assert!(!ExpressionD::nan().is_expanded());
    }

    #[test]
    fn test_structural_sharing() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let sum = var(&x) + var(&y);
        let shared = sum.clone();
        assert!(sum.same_cell(&shared));
        assert!(sum.use_count() >= 2);
        // the product reuses the sum's cell as a base rather than copying
        let product = ExpressionD::new_constant(2.0) * sum.clone();
        let (base, _) = product.base_to_exponent_map().iter().next().unwrap();
        assert!(base.same_cell(&sum));
    }
}

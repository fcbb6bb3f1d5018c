use std::f64::consts::PI;

use luaquat::{LuaEngine, Quat};
use proptest::prelude::*;

fn component() -> impl Strategy<Value = f64> {
    -1.0e6f64..1.0e6f64
}

fn quat() -> impl Strategy<Value = Quat> {
    (component(), component(), component(), component())
        .prop_map(|(x, y, z, w)| Quat::new(x, y, z, w))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// Position reported by a `bad argument` error under mlua's callback wrappers.
fn bad_arg_pos(err: &mlua::Error) -> Option<usize> {
    match err {
        mlua::Error::BadArgument { pos, .. } => Some(*pos),
        mlua::Error::CallbackError { cause, .. } => bad_arg_pos(cause),
        _ => None,
    }
}

/// Engine with `p` and `q` bound as script globals.
fn engine_with(p: Quat, q: Quat) -> LuaEngine {
    let eng = LuaEngine::new().unwrap();
    eng.set_global("p", eng.push_quat(p).unwrap()).unwrap();
    eng.set_global("q", eng.push_quat(q).unwrap()).unwrap();
    eng
}

#[test]
fn multiplication_is_not_commutative() {
    let eng = LuaEngine::new().unwrap();
    let (pq, qp): (Quat, Quat) = eng
        .eval("local p, q = Quat(1, 2, 3, 4), Quat(5, 6, 7, 8) return p * q, q * p")
        .unwrap();
    assert_ne!(pq, qp);
}

proptest! {
    /// Fields read back exactly what the constructor was given.
    #[test]
    fn constructor_fields_roundtrip(a in component(), b in component(), c in component(), d in component()) {
        let eng = LuaEngine::new().unwrap();
        for (name, v) in [("a", a), ("b", b), ("c", c), ("d", d)] {
            eng.set_global(name, v).unwrap();
        }
        let fields: (f64, f64, f64, f64) =
            eng.eval("local q = Quat(a, b, c, d) return q.x, q.y, q.z, q.w").unwrap();
        prop_assert_eq!(fields, (a, b, c, d));
        let table: Vec<f64> = eng.eval("Quat(a, b, c, d).table").unwrap();
        prop_assert_eq!(table, vec![a, b, c, d]);
    }

    #[test]
    fn addition_commutes(p in quat(), q in quat()) {
        let eng = engine_with(p, q);
        let (pq, qp): (Quat, Quat) = eng.eval("return p + q, q + p").unwrap();
        prop_assert_eq!(pq, qp);
        prop_assert_eq!(pq, Quat::new(p.x + q.x, p.y + q.y, p.z + q.z, p.w + q.w));
    }

    /// Scripted `*` agrees with the Hamilton product written out by hand.
    #[test]
    fn multiplication_is_hamilton(p in quat(), q in quat()) {
        let eng = engine_with(p, q);
        let r: Quat = eng.eval("p * q").unwrap();
        let expected = [
            p.w * q.x + p.x * q.w + p.y * q.z - p.z * q.y,
            p.w * q.y - p.x * q.z + p.y * q.w + p.z * q.x,
            p.w * q.z + p.x * q.y - p.y * q.x + p.z * q.w,
            p.w * q.w - p.x * q.x - p.y * q.y - p.z * q.z,
        ];
        for (got, want) in r.to_array().into_iter().zip(expected) {
            prop_assert!(close(got, want), "{got} vs {want}");
        }
    }

    #[test]
    fn tostring_three_decimals(p in quat()) {
        let eng = engine_with(p, p);
        let s: String = eng.eval("tostring(p)").unwrap();
        prop_assert_eq!(s, format!("[{:.3} {:.3} {:.3} {:.3}]", p.x, p.y, p.z, p.w));
    }

    #[test]
    fn degrees_are_scaled_radians(p in quat(), q in quat()) {
        prop_assume!(p.magnitude() > 0.0 && q.magnitude() > 0.0);
        let eng = engine_with(p, q);
        let (rad, deg): (f64, f64) = eng.eval("return p:rad(q), p:deg(q)").unwrap();
        prop_assert!((0.0..=PI).contains(&rad));
        prop_assert!(close(deg, rad * 180.0 / PI), "{deg} vs {rad}");
    }

    /// Any non-quaternion argument, in either position, is an argument error.
    #[test]
    fn non_quat_argument_rejected(n in any::<i32>(), op in prop::sample::select(vec!["*", "+"]), left in any::<bool>()) {
        let eng = LuaEngine::new().unwrap();
        eng.set_global("n", n).unwrap();
        let expr = if left {
            format!("local r = n {op} Quat(1, 2, 3, 4)")
        } else {
            format!("local r = Quat(1, 2, 3, 4) {op} n")
        };
        let err = eng.exec(&expr).unwrap_err();
        let pos = if left { 1 } else { 2 };
        prop_assert_eq!(bad_arg_pos(&err), Some(pos), "{}", err);
    }
}

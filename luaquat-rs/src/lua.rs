//! Lua 5.4 binding for [`Quat`] via the `mlua` crate.
//!
//! A [`LuaEngine`] owns one interpreter with the `Quat` class registered.
//! Scripts see:
//!
//! | Lua                       | Rust                                        |
//! |---------------------------|---------------------------------------------|
//! | `Quat(x, y, z, w)`        | [`quat_new`] → boxed [`Quat`]               |
//! | `q.x` `q.y` `q.z` `q.w`   | component fields                            |
//! | `q.table`                 | `{x, y, z, w}` sequence                     |
//! | `tostring(q)`             | [`QuatMethod::ToString`]                    |
//! | `a * b`                   | [`QuatMethod::Mul`] (Hamilton product)      |
//! | `a + b`                   | [`QuatMethod::Add`]                         |
//! | `a:rad(b)` / `a:deg(b)`   | [`QuatMethod::Rad`] / [`QuatMethod::Deg`]   |
//!
//! Every trampoline unboxes its arguments through [`check_quat`]; a value
//! that is not a boxed `Quat` aborts the call with a `bad argument #N`
//! error naming the method.  Failing to box a result is not fatal:
//! the error is printed and the script receives the message as a string in
//! place of the quaternion.

use std::path::Path;
use std::sync::Arc;

use mlua::prelude::*;
use mlua::{FromLua, FromLuaMulti, IntoLua, UserData, UserDataFields, UserDataMethods};

use crate::quat::Quat;
use crate::QUAT_CLASS;

/// Native side of a scripted method: unpack arguments, compute, repack.
pub type Trampoline = fn(&Lua, LuaMultiValue) -> LuaResult<LuaValue>;

// ── Method table ──────────────────────────────────────────────────────────

/// Scripted methods attached to every boxed [`Quat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuatMethod {
    ToString,
    Mul,
    Add,
    Rad,
    Deg,
}

impl QuatMethod {
    pub const ALL: [QuatMethod; 5] = [
        QuatMethod::ToString,
        QuatMethod::Mul,
        QuatMethod::Add,
        QuatMethod::Rad,
        QuatMethod::Deg,
    ];

    /// Name the method is registered under.
    pub fn name(self) -> &'static str {
        match self {
            Self::ToString => "__tostring",
            Self::Mul => "__mul",
            Self::Add => "__add",
            Self::Rad => "rad",
            Self::Deg => "deg",
        }
    }

    /// Metamethods are found by the VM itself; the others through `__index`.
    pub fn is_meta(self) -> bool {
        matches!(self, Self::ToString | Self::Mul | Self::Add)
    }

    pub fn trampoline(self) -> Trampoline {
        match self {
            Self::ToString => quat_string,
            Self::Mul => quat_mul,
            Self::Add => quat_add,
            Self::Rad => quat_angle_rad,
            Self::Deg => quat_angle_deg,
        }
    }
}

// ── Boxing ────────────────────────────────────────────────────────────────

impl UserData for Quat {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get("x", |_, this| Ok(this.x));
        fields.add_field_method_get("y", |_, this| Ok(this.y));
        fields.add_field_method_get("z", |_, this| Ok(this.z));
        fields.add_field_method_get("w", |_, this| Ok(this.w));
        fields.add_field_method_get("table", |lua, this| {
            lua.create_sequence_from(this.to_array())
        });
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        // Plain functions: the receiver is argument #1 and gets checked too.
        for method in QuatMethod::ALL {
            if method.is_meta() {
                methods.add_meta_function(method.name(), method.trampoline());
            } else {
                methods.add_function(method.name(), method.trampoline());
            }
        }
    }
}

impl FromLua for Quat {
    fn from_lua(value: LuaValue, _: &Lua) -> LuaResult<Self> {
        match value {
            LuaValue::UserData(ud) => Ok(*ud.borrow::<Self>()?),
            other => Err(LuaError::runtime(format!(
                "{QUAT_CLASS} expected, got {}",
                other.type_name()
            ))),
        }
    }
}

/// Unbox argument `pos` (1-based, receiver included) of a call to `func`.
///
/// Anything but a boxed [`Quat`] (including userdata of another type)
/// yields [`LuaError::BadArgument`] naming the position.
pub fn check_quat(args: &LuaMultiValue, pos: usize, func: &str) -> LuaResult<Quat> {
    let arg = pos.checked_sub(1).and_then(|i| args.get(i));
    if let Some(LuaValue::UserData(ud)) = arg {
        if let Ok(q) = ud.borrow::<Quat>() {
            return Ok(*q);
        }
    }
    let got = arg.map_or("no value", LuaValue::type_name);
    Err(LuaError::BadArgument {
        to: Some(func.to_owned()),
        pos,
        name: None,
        cause: Arc::new(LuaError::external(format!("{QUAT_CLASS} expected, got {got}"))),
    })
}

/// Box `q` for the script, or fall back to [`report_failure`].
fn box_quat(lua: &Lua, q: Quat) -> LuaResult<LuaValue> {
    match lua.create_userdata(q) {
        Ok(ud) => Ok(LuaValue::UserData(ud)),
        Err(err) => report_failure(lua, &err),
    }
}

/// Print a trampoline failure and hand the message back as the call's result.
pub fn report_failure(lua: &Lua, err: &LuaError) -> LuaResult<LuaValue> {
    tracing::error!(%err, "cannot box {} result", QUAT_CLASS);
    println!("ERROR {err}");
    Ok(LuaValue::String(lua.create_string(err.to_string())?))
}

// ── Trampolines ───────────────────────────────────────────────────────────

/// `Quat(x, y, z, w)`.  Arguments are coerced the way Lua arithmetic
/// would; missing or non-numeric ones read as `0`.
pub fn quat_new(lua: &Lua, args: LuaMultiValue) -> LuaResult<LuaValue> {
    let mut c = [0.0; 4];
    for (slot, arg) in c.iter_mut().zip(args) {
        *slot = lua.coerce_number(arg)?.unwrap_or(0.0);
    }
    box_quat(lua, Quat::from(c))
}

fn quat_string(lua: &Lua, args: LuaMultiValue) -> LuaResult<LuaValue> {
    let q = check_quat(&args, 1, QuatMethod::ToString.name())?;
    Ok(LuaValue::String(lua.create_string(q.to_string())?))
}

fn quat_mul(lua: &Lua, args: LuaMultiValue) -> LuaResult<LuaValue> {
    let name = QuatMethod::Mul.name();
    let a = check_quat(&args, 1, name)?;
    let b = check_quat(&args, 2, name)?;
    box_quat(lua, a * b)
}

fn quat_add(lua: &Lua, args: LuaMultiValue) -> LuaResult<LuaValue> {
    let name = QuatMethod::Add.name();
    let a = check_quat(&args, 1, name)?;
    let b = check_quat(&args, 2, name)?;
    box_quat(lua, a + b)
}

fn quat_angle_rad(_: &Lua, args: LuaMultiValue) -> LuaResult<LuaValue> {
    let name = QuatMethod::Rad.name();
    let a = check_quat(&args, 1, name)?;
    let b = check_quat(&args, 2, name)?;
    Ok(LuaValue::Number(a.angle_rad(b)))
}

fn quat_angle_deg(_: &Lua, args: LuaMultiValue) -> LuaResult<LuaValue> {
    let name = QuatMethod::Deg.name();
    let a = check_quat(&args, 1, name)?;
    let b = check_quat(&args, 2, name)?;
    Ok(LuaValue::Number(a.angle_deg(b)))
}

/// Install the `Quat` constructor as a global of `lua`.
pub fn register_quat(lua: &Lua) -> LuaResult<()> {
    lua.globals().set(QUAT_CLASS, lua.create_function(quat_new)?)?;
    tracing::debug!(
        class = QUAT_CLASS,
        methods = QuatMethod::ALL.len(),
        "registered Lua class"
    );
    Ok(())
}

// ── LuaEngine ─────────────────────────────────────────────────────────────

/// A Lua 5.4 interpreter with the `Quat` class pre-registered.
///
/// The interpreter lives exactly as long as the engine; dropping it closes
/// the Lua state.
pub struct LuaEngine {
    lua: Lua,
}

impl LuaEngine {
    pub fn new() -> LuaResult<Self> {
        let lua = Lua::new();
        register_quat(&lua)?;
        Ok(Self { lua })
    }

    /// The underlying interpreter.
    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    /// Load and execute a Lua source file.
    pub fn load_file(&self, path: &Path) -> LuaResult<()> {
        self.lua.load(path).exec()
    }

    /// Execute an arbitrary Lua chunk string.
    pub fn exec(&self, chunk: &str) -> LuaResult<()> {
        self.lua.load(chunk).exec()
    }

    /// Evaluate a Lua expression (or chunk with `return`) and convert the
    /// result to `R`.
    pub fn eval<R: FromLuaMulti>(&self, expr: &str) -> LuaResult<R> {
        self.lua.load(expr).eval()
    }

    pub fn set_global(&self, name: &str, value: impl IntoLua) -> LuaResult<()> {
        self.lua.globals().set(name, value)
    }

    /// Box a host-side quaternion so it can be handed to scripts.
    pub fn push_quat(&self, q: Quat) -> LuaResult<LuaAnyUserData> {
        self.lua.create_userdata(q)
    }
}

impl Drop for LuaEngine {
    fn drop(&mut self) {
        tracing::debug!("closing Lua state");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

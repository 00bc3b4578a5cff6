//! The streaming coroutine engine (§4.2).
//!
//! The specification's generator model — a coroutine that `yield`s
//! commands (`peek`, `consume`, `position`) and is resumed with their
//! answers — has no direct stable-Rust equivalent; there are no
//! first-class generators or fibers to reach for. [`Engine`] realizes the
//! same contract with ordinary function calls instead: `peek`/`consume`
//! read directly from a buffered window over the input, and "suspend
//! until more input arrives" is realized by a production raising
//! [`crate::failure::Failure::Incomplete`] and unwinding back to
//! [`Engine::run_once`], which rewinds the cursor to the start and asks
//! the caller to retry the entire invocation once `feed` has supplied
//! more input. This is safe because nothing is committed on that path:
//! a coroutine only commits by returning `Ok`.
//!
//! [`combinators`] provides the standard library of production
//! combinators (`maybe`, `fatal`, `first`, `furthest`, `many`, ...) that
//! every lexical and syntactic rule is built from.

mod core_engine;

pub mod combinators;

pub use combinators::{
    consume, consume_if, fatal, first, furthest, look_ahead, many, maybe, null, peek, position,
    set_position, try_consume, try_peek, Branch,
};
pub use core_engine::{Engine, Outcome, Signal};

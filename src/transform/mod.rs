//! Built-in structural transforms and higher-order combinators
//!
//! # Module Organization
//!
//! - [`combinator`] - map_each / map_value / map_key / map_keys
//! - [`record`] - nest
//! - [`sequence`] - wrap / group / ungroup
//! - [`combine`] - recursive equality join and [`CombineSpec`]
//!
//! Each transform is exposed two ways: as plain typed functions (pure and
//! in-place forms), and as registry entries installed by
//! [`crate::Registry::core`] under the `sequence` and `record` namespaces.
//! The adapter functions in this module bridge the registry's bound-argument
//! calling convention to the typed functions.
//!
//! Copyright (c) 2026 Remodel Team
//! Licensed under the Apache-2.0 license

pub mod combinator;
pub mod combine;
pub mod record;
pub mod sequence;



pub use combine::CombineSpec;

use crate::error::Result;
use crate::function::{arg, Arg};
use crate::registry::{ArgKind, Registry};
use serde_json::Value;

/// Register the built-in transforms.
pub(crate) fn install(registry: &mut Registry) {
    registry.builtin(
        "sequence",
        "map_each",
        &[ArgKind::Handle],
        map_each_fn,
        map_each_in_place_fn,
    );
    registry.builtin(
        "sequence",
        "wrap",
        &[ArgKind::Key, ArgKind::KeyList],
        wrap_fn,
        wrap_in_place_fn,
    );
    registry.builtin(
        "sequence",
        "group",
        &[ArgKind::Key, ArgKind::KeyList],
        group_fn,
        group_in_place_fn,
    );
    registry.builtin(
        "sequence",
        "ungroup",
        &[ArgKind::Key, ArgKind::KeyList],
        ungroup_fn,
        ungroup_in_place_fn,
    );
    registry.builtin(
        "sequence",
        "combine",
        &[ArgKind::Specs],
        combine_fn,
        combine_in_place_fn,
    );
    registry.builtin(
        "record",
        "nest",
        &[ArgKind::Key, ArgKind::KeyList],
        nest_fn,
        nest_in_place_fn,
    );
    registry.builtin(
        "record",
        "map_value",
        &[ArgKind::Key, ArgKind::Handle],
        map_value_fn,
        map_value_in_place_fn,
    );
    registry.builtin(
        "record",
        "map_key",
        &[ArgKind::Key, ArgKind::Handle],
        map_key_fn,
        map_key_in_place_fn,
    );
    registry.builtin(
        "record",
        "map_keys",
        &[ArgKind::Handle],
        map_keys_fn,
        map_keys_in_place_fn,
    );
}

fn map_each_fn(args: &[Arg], input: &Value) -> Result<Value> {
    combinator::map_each(arg(args, 0)?.as_handle()?, input)
}

fn map_each_in_place_fn(args: &[Arg], input: &mut Value) -> Result<()> {
    combinator::map_each_in_place(arg(args, 0)?.as_handle()?, input)
}

fn map_value_fn(args: &[Arg], input: &Value) -> Result<Value> {
    combinator::map_value(arg(args, 0)?.as_key()?, arg(args, 1)?.as_handle()?, input)
}

fn map_value_in_place_fn(args: &[Arg], input: &mut Value) -> Result<()> {
    combinator::map_value_in_place(arg(args, 0)?.as_key()?, arg(args, 1)?.as_handle()?, input)
}

fn map_key_fn(args: &[Arg], input: &Value) -> Result<Value> {
    combinator::map_key(arg(args, 0)?.as_key()?, arg(args, 1)?.as_handle()?, input)
}

fn map_key_in_place_fn(args: &[Arg], input: &mut Value) -> Result<()> {
    combinator::map_key_in_place(arg(args, 0)?.as_key()?, arg(args, 1)?.as_handle()?, input)
}

fn map_keys_fn(args: &[Arg], input: &Value) -> Result<Value> {
    combinator::map_keys(arg(args, 0)?.as_handle()?, input)
}

fn map_keys_in_place_fn(args: &[Arg], input: &mut Value) -> Result<()> {
    combinator::map_keys_in_place(arg(args, 0)?.as_handle()?, input)
}

fn nest_fn(args: &[Arg], input: &Value) -> Result<Value> {
    record::nest(arg(args, 0)?.as_key()?, &arg(args, 1)?.as_key_list()?, input)
}

fn nest_in_place_fn(args: &[Arg], input: &mut Value) -> Result<()> {
    record::nest_in_place(arg(args, 0)?.as_key()?, &arg(args, 1)?.as_key_list()?, input)
}

fn wrap_fn(args: &[Arg], input: &Value) -> Result<Value> {
    sequence::wrap(arg(args, 0)?.as_key()?, &arg(args, 1)?.as_key_list()?, input)
}

fn wrap_in_place_fn(args: &[Arg], input: &mut Value) -> Result<()> {
    sequence::wrap_in_place(arg(args, 0)?.as_key()?, &arg(args, 1)?.as_key_list()?, input)
}

fn group_fn(args: &[Arg], input: &Value) -> Result<Value> {
    sequence::group(arg(args, 0)?.as_key()?, &arg(args, 1)?.as_key_list()?, input)
}

fn group_in_place_fn(args: &[Arg], input: &mut Value) -> Result<()> {
    sequence::group_in_place(arg(args, 0)?.as_key()?, &arg(args, 1)?.as_key_list()?, input)
}

fn ungroup_fn(args: &[Arg], input: &Value) -> Result<Value> {
    sequence::ungroup(arg(args, 0)?.as_key()?, &arg(args, 1)?.as_key_list()?, input)
}

fn ungroup_in_place_fn(args: &[Arg], input: &mut Value) -> Result<()> {
    sequence::ungroup_in_place(arg(args, 0)?.as_key()?, &arg(args, 1)?.as_key_list()?, input)
}

fn combine_fn(args: &[Arg], input: &Value) -> Result<Value> {
    combine::combine(arg(args, 0)?.as_specs()?, input)
}

fn combine_in_place_fn(args: &[Arg], input: &mut Value) -> Result<()> {
    combine::combine_in_place(arg(args, 0)?.as_specs()?, input)
}

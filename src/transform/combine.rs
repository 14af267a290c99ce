//! Recursive equality join
//!
//! `combine` attaches nested child sequences to their parent records by
//! equality of join keys, level by level. The input is a `[parents, groups]`
//! pair whose shape must match the spec tree; the shape is validated up front
//! so a mismatch fails fast instead of deep inside the recursion.
//!
//! Copyright (c) 2026 Remodel Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::value::{self, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Describes how one child sequence attaches to its parents
///
/// `key_map` is the equality predicate: a child matches a parent iff for
/// every `(child_key, parent_key)` pair the two records hold equal values.
/// `nested` describes how grandchildren attach to each child, recursively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombineSpec {
    /// Key under which the matched children are attached to each parent
    pub target: String,
    /// Ordered child-key to parent-key pairs defining the join predicate
    pub key_map: Vec<(String, String)>,
    /// Specs for the next level down
    #[serde(default)]
    pub nested: Vec<CombineSpec>,
}

impl CombineSpec {
    /// Create a leaf spec with no nested levels.
    pub fn new<T, I, K>(target: T, key_map: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = (K, K)>,
        K: Into<String>,
    {
        CombineSpec {
            target: target.into(),
            key_map: key_map
                .into_iter()
                .map(|(child, parent)| (child.into(), parent.into()))
                .collect(),
            nested: Vec::new(),
        }
    }

    /// Attach a spec for the next level down.
    pub fn with_nested(mut self, spec: CombineSpec) -> Self {
        self.nested.push(spec);
        self
    }
}

/// One level of combine input, shaped against the spec tree
struct JoinNode<'a> {
    data: &'a [Value],
    children: Vec<JoinNode<'a>>,
}

/// Join nested child sequences onto their parents.
///
/// Every parent appears in the output exactly once, in input order,
/// decorated with one target key per spec; a parent with no matching
/// children receives an empty sequence. Matching is a plain scan per parent,
/// keeping exact value-equality semantics and child order.
pub fn combine(specs: &[CombineSpec], input: &Value) -> Result<Value> {
    let (parents, nodes) = parse_pair(input, specs)?;
    Ok(Value::Array(join_level(parents, &nodes, specs)?))
}

/// In-place form of [`combine`]. The join rebuilds every parent record, so
/// this shares the pure implementation and replaces the container.
pub fn combine_in_place(specs: &[CombineSpec], input: &mut Value) -> Result<()> {
    let combined = combine(specs, &*input)?;
    *input = combined;
    Ok(())
}

fn expect_sequence<'a>(value: &'a Value, context: &str) -> Result<&'a [Value]> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(Error::MalformedCombineSpec {
            message: format!("{} must be a sequence, found {}", context, value::kind(other)),
        }),
    }
}

fn parse_pair<'a>(
    value: &'a Value,
    specs: &[CombineSpec],
) -> Result<(&'a [Value], Vec<JoinNode<'a>>)> {
    let pair = expect_sequence(value, "combine input")?;
    if pair.len() != 2 {
        return Err(Error::MalformedCombineSpec {
            message: format!(
                "combine input must be a [parents, children] pair, found a sequence of {}",
                pair.len()
            ),
        });
    }
    let parents = expect_sequence(&pair[0], "parent data")?;
    let groups = expect_sequence(&pair[1], "child groups")?;
    if groups.len() != specs.len() {
        return Err(Error::MalformedCombineSpec {
            message: format!(
                "{} child groups do not match {} combine specs",
                groups.len(),
                specs.len()
            ),
        });
    }
    let children = groups
        .iter()
        .zip(specs)
        .map(|(group, spec)| parse_node(group, spec))
        .collect::<Result<Vec<_>>>()?;
    Ok((parents, children))
}

fn parse_node<'a>(value: &'a Value, spec: &CombineSpec) -> Result<JoinNode<'a>> {
    if spec.nested.is_empty() {
        let context = format!("child data for '{}'", spec.target);
        Ok(JoinNode {
            data: expect_sequence(value, &context)?,
            children: Vec::new(),
        })
    } else {
        let (data, children) = parse_pair(value, &spec.nested)?;
        Ok(JoinNode { data, children })
    }
}

fn join_level(
    parents: &[Value],
    nodes: &[JoinNode<'_>],
    specs: &[CombineSpec],
) -> Result<Vec<Value>> {
    // Resolve the deepest levels first so parents join against
    // fully-decorated children.
    let mut resolved: Vec<Vec<Value>> = Vec::with_capacity(specs.len());
    for (node, spec) in nodes.iter().zip(specs) {
        if spec.nested.is_empty() {
            resolved.push(node.data.to_vec());
        } else {
            resolved.push(join_level(node.data, &node.children, &spec.nested)?);
        }
    }

    let mut output = Vec::with_capacity(parents.len());
    for parent in parents {
        let parent_record = value::as_record(parent)?;
        let mut decorated = parent_record.clone();
        for (spec, children) in specs.iter().zip(&resolved) {
            let mut matched = Vec::new();
            for child in children {
                let child_record = value::as_record(child)?;
                if join_matches(child_record, parent_record, &spec.key_map) {
                    matched.push(child.clone());
                }
            }
            decorated.insert(spec.target.clone(), Value::Array(matched));
        }
        output.push(Value::Object(decorated));
    }
    Ok(output)
}

fn join_matches(child: &Record, parent: &Record, key_map: &[(String, String)]) -> bool {
    // absent fields compare as null, so a missing key on both sides matches
    key_map.iter().all(|(child_key, parent_key)| {
        child.get(child_key).unwrap_or(&Value::Null)
            == parent.get(parent_key).unwrap_or(&Value::Null)
    })
}

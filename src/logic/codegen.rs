//! Renders a compiled [`SeedPlan`] as Rust source for embedding in the
//! bootstrap binary.
//!
//! Options that are referenced as parents are bound to a local holding their
//! [`LookupKey`], and children take their `parent` from that binding, so the
//! generated code wires parents exactly the way the runtime identity map
//! resolves them.

use itertools::Itertools;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

use crate::model::{LookupKey, OptionOp, SeedPlan, SetOp};

pub const DEFAULT_FUNCTION_NAME: &str = "real_estate_dictionary";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Name of the generated plan function
    pub function_name: String,
    /// File name of the source, for the header
    pub source_name: String,
    pub source_digest: String,
    pub excluded_sets: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            function_name: DEFAULT_FUNCTION_NAME.to_string(),
            source_name: String::new(),
            source_digest: String::new(),
            excluded_sets: Vec::new(),
        }
    }
}

/// SHA-256 of the raw source bytes, hex encoded
pub fn source_digest(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Reduces a natural key to a fragment usable in a Rust identifier
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Strict and reserved keywords of the 2021 edition, plus `gen` from 2024
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return", "self",
    "Self", "static", "struct", "super", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Whether `name` can be used verbatim as a Rust function name
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let well_formed = match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            name != "_" && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    };
    well_formed && !RUST_KEYWORDS.contains(&name)
}

/// Escapes `value` for use inside a Rust string literal
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{{{:x}}}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

fn literal(value: &str) -> String {
    format!("\"{}\".to_string()", escape_string(value))
}

pub fn render_plan(plan: &SeedPlan, options: &RenderOptions) -> String {
    Renderer::new(options).render(plan)
}

/// Single-use renderer; the variable counter lives and dies with it
struct Renderer<'a> {
    options: &'a RenderOptions,
    counter: usize,
    bindings: HashMap<LookupKey, String>,
    needs_lookup_key: bool,
}

impl<'a> Renderer<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            counter: 0,
            bindings: HashMap::new(),
            needs_lookup_key: false,
        }
    }

    fn render(mut self, plan: &SeedPlan) -> String {
        let referenced: HashSet<&LookupKey> = plan.options().filter_map(|o| o.parent.as_ref()).collect();

        let mut body = String::new();
        body.push_str("    // Sets\n");
        for set in plan.sets() {
            self.render_set(&mut body, set);
        }

        let (roots, children): (Vec<&OptionOp>, Vec<&OptionOp>) = plan.options().partition(|o| o.parent.is_none());
        if !roots.is_empty() {
            body.push_str("\n    // Options without parents\n");
        }
        for option in roots {
            self.render_option(&mut body, option, referenced.contains(&option.lookup_key()));
        }
        if !children.is_empty() {
            body.push_str("\n    // Options with parents\n");
        }
        for option in children {
            self.render_option(&mut body, option, referenced.contains(&option.lookup_key()));
        }

        let mut out = String::new();
        self.render_header(&mut out, plan);
        out.push_str(&format!("pub fn {}() -> SeedPlan {{\n", self.options.function_name));
        out.push_str(&format!("    let mut plan = SeedPlan::with_capacity({});\n", plan.len()));
        out.push('\n');
        out.push_str(&body);
        out.push_str("\n    plan\n}\n");
        out
    }

    fn render_header(&self, out: &mut String, plan: &SeedPlan) {
        let set_count = plan.sets().map(|s| s.name.as_str()).unique().count();
        let option_count = plan.options().count();
        let locales = plan.sets().map(|s| s.locale.as_str()).unique().sorted().join(", ");

        out.push_str(&format!(
            "// @generated by generate-seeds from {}. Do not edit by hand.\n",
            self.options.source_name
        ));
        if !self.options.excluded_sets.is_empty() {
            out.push_str(&format!("// Excluded sets: {}\n", self.options.excluded_sets.join(", ")));
        }
        out.push('\n');
        if self.needs_lookup_key {
            out.push_str("use crate::model::{LookupKey, OptionOp, SeedPlan, SetOp};\n");
        } else {
            out.push_str("use crate::model::{OptionOp, SeedPlan, SetOp};\n");
        }
        out.push('\n');
        out.push_str(&format!(
            "pub const SOURCE_DIGEST: &str = \"{}\";\n",
            escape_string(&self.options.source_digest)
        ));
        out.push('\n');
        out.push_str(&format!(
            "/// {} sets and {} options in locales: {}\n",
            set_count, option_count, locales
        ));
    }

    fn render_set(&mut self, out: &mut String, set: &SetOp) {
        out.push_str("    plan.push_set(SetOp {\n");
        out.push_str(&format!("        name: {},\n", literal(&set.name)));
        out.push_str(&format!("        locale: {},\n", literal(&set.locale)));
        out.push_str(&format!("        label: {},\n", literal(&set.label)));
        out.push_str(&format!("        description: {},\n", description(&set.description)));
        out.push_str(&format!("        active: {},\n", set.active));
        out.push_str("    });\n");
    }

    fn render_option(&mut self, out: &mut String, option: &OptionOp, bind: bool) {
        self.counter += 1;

        if bind {
            let var = self.variable_name(option);
            out.push_str(&format!("    let {} = plan.push_option(OptionOp {{\n", var));
            self.bindings.insert(option.lookup_key(), var);
        } else {
            out.push_str("    plan.push_option(OptionOp {\n");
        }

        let parent = match &option.parent {
            None => "None".to_string(),
            Some(parent) => match self.bindings.get(parent) {
                Some(var) => format!("Some({}.clone())", var),
                None => {
                    self.needs_lookup_key = true;
                    format!("Some(LookupKey::from(\"{}\"))", escape_string(parent.as_str()))
                }
            },
        };

        out.push_str(&format!("        set: {},\n", literal(&option.set)));
        out.push_str(&format!("        key: {},\n", literal(&option.key)));
        out.push_str(&format!("        locale: {},\n", literal(&option.locale)));
        out.push_str(&format!("        short_code: {},\n", literal(&option.short_code)));
        out.push_str(&format!("        label: {},\n", literal(&option.label)));
        out.push_str(&format!("        description: {},\n", description(&option.description)));
        out.push_str(&format!("        value: {},\n", literal(&option.value)));
        out.push_str(&format!("        order: {},\n", option.order));
        out.push_str(&format!("        active: {},\n", option.active));
        out.push_str(&format!("        parent: {},\n", parent));
        out.push_str("    });\n");
    }

    fn variable_name(&self, option: &OptionOp) -> String {
        let counter = self.counter.to_string();
        let key = sanitize_name(&option.key);
        let locale = sanitize_name(&option.locale);
        ["opt", counter.as_str(), key.as_str(), locale.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .join("_")
    }
}

fn description(value: &str) -> String {
    if value.is_empty() {
        "String::new()".to_string()
    } else {
        literal(value)
    }
}

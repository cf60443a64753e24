//! Compiles a [`SeedSource`] into an ordered [`SeedPlan`].

use itertools::Itertools;
use log::warn;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::SpecError;
use crate::logic::partition::{order_nodes, Node, OrderingStrategy};
use crate::model::{LookupKey, MissingParentPolicy, OptionDef, OptionOp, SeedPlan, SeedSource, SetDef, SetOp};

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub strategy: OrderingStrategy,
    pub missing_parent: MissingParentPolicy,
    /// Sets dropped from the source together with their options
    pub exclude_sets: BTreeSet<String>,
}

impl CompileOptions {
    pub fn excluding<I, S>(mut self, sets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_sets.extend(sets.into_iter().map(Into::into));
        self
    }

    pub fn with_missing_parent(mut self, policy: MissingParentPolicy) -> Self {
        self.missing_parent = policy;
        self
    }

    pub fn with_strategy(mut self, strategy: OrderingStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Compilation {
    pub plan: SeedPlan,
    /// Locales every set was materialized in, sorted
    pub locales: Vec<String>,
    /// Set definitions after exclusions, including implicit ones
    pub set_count: usize,
    pub option_count: usize,
    /// Sets referenced by options but never declared
    pub implicit_sets: Vec<String>,
}

pub fn compile_json(data: &str, options: &CompileOptions) -> Result<Compilation, SpecError> {
    let source = SeedSource::from_json(data)?;
    compile(&source, options)
}

pub fn compile(source: &SeedSource, options: &CompileOptions) -> Result<Compilation, SpecError> {
    let mut sets: Vec<SetDef> = Vec::new();
    for set in source.sets.iter().filter(|s| !options.exclude_sets.contains(&s.name)) {
        check_name("set", &set.name)?;
        if let Some(parent) = &set.parent {
            check_name("parent set", parent)?;
        }
        if sets.iter().any(|s| s.name == set.name) {
            return Err(SpecError::DuplicateSet { name: set.name.clone() });
        }
        sets.push(set.clone());
    }

    let defs: Vec<&OptionDef> = source
        .options
        .iter()
        .filter(|o| !options.exclude_sets.contains(&o.set))
        .collect();

    let mut implicit_sets = Vec::new();
    for name in defs.iter().map(|o| o.set.as_str()).unique() {
        if !sets.iter().any(|s| s.name == name) {
            warn!("set '{}' is used by options but not declared, declaring it implicitly", name);
            implicit_sets.push(name.to_string());
            sets.push(SetDef::new(name));
        }
    }

    let locales: Vec<String> = defs
        .iter()
        .map(|o| o.locale.as_str())
        .chain(sets.iter().flat_map(|s| s.labels.keys().map(String::as_str)))
        .unique()
        .sorted()
        .map(str::to_string)
        .collect();

    let set_index: HashMap<&str, &SetDef> = sets.iter().map(|s| (s.name.as_str(), s)).collect();

    let mut seen = HashSet::with_capacity(defs.len());
    let mut nodes = Vec::with_capacity(defs.len());
    for def in &defs {
        check_name("set", &def.set)?;
        check_name("option key", &def.key)?;
        check_name("locale", &def.locale)?;
        let key = LookupKey::option(&def.set, &def.key, &def.locale);
        if !seen.insert(key.clone()) {
            return Err(SpecError::DuplicateOption { key });
        }

        let parent_set = set_index
            .get(def.set.as_str())
            .map_or(def.set.as_str(), |set| set.parent_set());
        let parent = match def.parent_ref(parent_set) {
            Some((set, parent_key)) => {
                check_name("parent key", parent_key)?;
                Some(LookupKey::option(set, parent_key, &def.locale))
            }
            None => None,
        };

        nodes.push(Node { key, parent, item: *def });
    }

    let ordered = order_nodes(nodes, options.strategy, options.missing_parent)?;

    let mut plan = SeedPlan::with_capacity(sets.len() * locales.len() + ordered.len());
    for set in &sets {
        for locale in &locales {
            plan.push_set(SetOp {
                name: set.name.clone(),
                locale: locale.clone(),
                label: set.label_for(locale).to_string(),
                description: String::new(),
                active: set.active,
            });
        }
    }

    for node in ordered {
        let def = node.item;
        plan.push_option(OptionOp {
            set: def.set.clone(),
            key: def.key.clone(),
            locale: def.locale.clone(),
            short_code: def.short_code().to_string(),
            label: def.label().to_string(),
            description: String::new(),
            value: def.value().to_string(),
            order: def.order,
            active: def.active,
            parent: node.parent,
        });
    }

    Ok(Compilation {
        plan,
        locales,
        set_count: sets.len(),
        option_count: defs.len(),
        implicit_sets,
    })
}

/// Lookup keys join their parts with ':', so no part may contain one
fn check_name(kind: &'static str, name: &str) -> Result<(), SpecError> {
    if name.contains(':') {
        return Err(SpecError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SeedOperation;

    fn source() -> SeedSource {
        SeedSource {
            format: None,
            sets: vec![
                SetDef::new("estate_category"),
                SetDef::new("estate_type").with_parent("estate_category"),
                SetDef::new("estate_subtype").with_parent("estate_type"),
            ],
            options: vec![
                OptionDef::new("estate_subtype", "bungalow", "en").with_parent("house"),
                OptionDef::new("estate_category", "residential", "en"),
                OptionDef::new("estate_type", "house", "en").with_parent("residential"),
                OptionDef::new("estate_category", "residential", "es"),
                OptionDef::new("estate_type", "house", "es").with_parent("residential"),
            ],
        }
    }

    fn option_keys(plan: &SeedPlan) -> Vec<String> {
        plan.options().map(|o| o.lookup_key().to_string()).collect()
    }

    #[test]
    fn test_sets_precede_options_for_every_locale() {
        let compilation = compile(&source(), &CompileOptions::default()).unwrap();
        assert_eq!(compilation.locales, vec!["en", "es"]);
        assert_eq!(compilation.set_count, 3);
        assert_eq!(compilation.option_count, 5);

        let ops = compilation.plan.operations();
        assert!(ops[..6].iter().all(|op| matches!(op, SeedOperation::UpsertSet(_))));
        assert!(ops[6..].iter().all(|op| matches!(op, SeedOperation::UpsertOption(_))));
        let sets: Vec<String> = compilation.plan.sets().map(|s| s.lookup_key().to_string()).collect();
        assert_eq!(sets[0], "estate_category:en");
        assert_eq!(sets[1], "estate_category:es");
    }

    #[test]
    fn test_resolved_order_puts_parents_first() {
        let compilation = compile(&source(), &CompileOptions::default()).unwrap();
        assert_eq!(
            option_keys(&compilation.plan),
            vec![
                "estate_category:residential:en",
                "estate_category:residential:es",
                "estate_type:house:en",
                "estate_type:house:es",
                "estate_subtype:bungalow:en",
            ]
        );

        let bungalow = compilation.plan.options().last().unwrap();
        assert_eq!(
            bungalow.parent.as_ref().map(LookupKey::as_str),
            Some("estate_type:house:en")
        );
    }

    #[test]
    fn test_two_bucket_order_keeps_input_order_within_buckets() {
        let options = CompileOptions::default().with_strategy(OrderingStrategy::TwoBucket);
        let compilation = compile(&source(), &options).unwrap();
        assert_eq!(
            option_keys(&compilation.plan),
            vec![
                "estate_category:residential:en",
                "estate_category:residential:es",
                "estate_subtype:bungalow:en",
                "estate_type:house:en",
                "estate_type:house:es",
            ]
        );
    }

    #[test]
    fn test_roots_always_precede_children() {
        for strategy in [OrderingStrategy::TwoBucket, OrderingStrategy::Resolved] {
            let compilation = compile(&source(), &CompileOptions::default().with_strategy(strategy)).unwrap();
            let first_child = compilation.plan.options().position(|o| o.parent.is_some()).unwrap();
            assert!(compilation.plan.options().skip(first_child).all(|o| o.parent.is_some()));
        }
    }

    #[test]
    fn test_exclusions_drop_sets_and_their_options() {
        let mut source = source();
        source.sets.push(SetDef::new("country"));
        source.options.push(OptionDef::new("country", "ar", "en"));

        let compilation = compile(&source, &CompileOptions::default().excluding(["country"])).unwrap();
        assert_eq!(compilation.set_count, 3);
        assert!(compilation.plan.sets().all(|s| s.name != "country"));
        assert!(compilation.plan.options().all(|o| o.set != "country"));
    }

    #[test]
    fn test_missing_parent_is_a_spec_error_by_default() {
        let source = SeedSource {
            format: None,
            sets: vec![SetDef::new("category")],
            options: vec![OptionDef::new("type", "house", "en").with_parent("category:residential")],
        };

        let err = compile(&source, &CompileOptions::default()).unwrap_err();
        assert!(matches!(err, SpecError::UnresolvedParents { .. }));
        assert!(err.to_string().contains("type:house:en -> category:residential:en"));
    }

    #[test]
    fn test_missing_parent_fallback_declares_implicit_set() {
        let source = SeedSource {
            format: None,
            sets: vec![SetDef::new("category")],
            options: vec![OptionDef::new("type", "house", "en").with_parent("category:residential")],
        };

        let options = CompileOptions::default().with_missing_parent(MissingParentPolicy::TreatAsRoot);
        let compilation = compile(&source, &options).unwrap();
        assert_eq!(compilation.implicit_sets, vec!["type"]);
        assert_eq!(compilation.plan.sets().count(), 2);

        let house = compilation.plan.options().next().unwrap();
        assert_eq!(
            house.parent.as_ref().map(LookupKey::as_str),
            Some("category:residential:en")
        );
    }

    #[test]
    fn test_parent_is_looked_up_in_child_locale() {
        let source = SeedSource {
            format: None,
            sets: vec![SetDef::new("estate_category"), SetDef::new("estate_type").with_parent("estate_category")],
            options: vec![
                OptionDef::new("estate_category", "residential", "en"),
                OptionDef::new("estate_type", "house", "es").with_parent("residential"),
            ],
        };

        let err = compile(&source, &CompileOptions::default()).unwrap_err();
        match err {
            SpecError::UnresolvedParents { missing } => {
                assert_eq!(missing[0].1.as_str(), "estate_category:residential:es");
            }
            other => panic!("expected UnresolvedParents, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicates_are_rejected() {
        let mut duplicated = source();
        duplicated.options.push(OptionDef::new("estate_category", "residential", "en"));
        assert!(matches!(
            compile(&duplicated, &CompileOptions::default()),
            Err(SpecError::DuplicateOption { .. })
        ));

        let mut duplicated = source();
        duplicated.sets.push(SetDef::new("estate_type"));
        assert!(matches!(
            compile(&duplicated, &CompileOptions::default()),
            Err(SpecError::DuplicateSet { .. })
        ));
    }

    #[test]
    fn test_colons_in_names_are_rejected() {
        let cases = [
            (SeedSource {
                format: None,
                sets: vec![SetDef::new("estate:category")],
                options: vec![],
            }, "set"),
            (SeedSource {
                format: None,
                sets: vec![SetDef::new("estate_category")],
                options: vec![OptionDef::new("estate_category", "resi:dential", "en")],
            }, "option key"),
            (SeedSource {
                format: None,
                sets: vec![],
                options: vec![OptionDef::new("estate:type", "house", "en")],
            }, "set"),
            (SeedSource {
                format: None,
                sets: vec![],
                options: vec![OptionDef::new("estate_type", "house", "en:GB")],
            }, "locale"),
            (SeedSource {
                format: None,
                sets: vec![SetDef::new("estate_type")],
                options: vec![OptionDef::new("estate_type", "house", "en").with_parent("category:resi:dential")],
            }, "parent key"),
        ];

        for (source, expected_kind) in cases {
            match compile(&source, &CompileOptions::default()) {
                Err(SpecError::InvalidName { kind, name }) => {
                    assert_eq!(kind, expected_kind);
                    assert!(name.contains(':'));
                }
                other => panic!("expected InvalidName, got {:?}", other.map(|c| c.set_count)),
            }
        }

        let err = compile(
            &SeedSource {
                format: None,
                sets: vec![SetDef::new("a:b")],
                options: vec![],
            },
            &CompileOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "set 'a:b' must not contain ':'");
    }

    #[test]
    fn test_qualified_parent_still_compiles() {
        let source = SeedSource {
            format: None,
            sets: vec![SetDef::new("category"), SetDef::new("type")],
            options: vec![
                OptionDef::new("category", "residential", "en"),
                OptionDef::new("type", "house", "en").with_parent("category:residential"),
            ],
        };
        let compilation = compile(&source, &CompileOptions::default()).unwrap();
        assert_eq!(compilation.option_count, 2);
    }

    #[test]
    fn test_parse_errors_are_spec_errors() {
        let err = compile_json("{ not json", &CompileOptions::default()).unwrap_err();
        assert!(matches!(err, SpecError::Parse(_)));
    }
}

// @generated by generate-seeds from dictionary.json. Do not edit by hand.
// Excluded sets: country

use crate::model::{OptionOp, SeedPlan, SetOp};

pub const SOURCE_DIGEST: &str = "701a8741208357991d408f0ea6be00a6800ece4e1685089c6a5357f434bad340";

/// 3 sets and 14 options in locales: en, es
pub fn real_estate_dictionary() -> SeedPlan {
    let mut plan = SeedPlan::with_capacity(20);

    // Sets
    plan.push_set(SetOp {
        name: "estate_category".to_string(),
        locale: "en".to_string(),
        label: "Estate category".to_string(),
        description: String::new(),
        active: true,
    });
    plan.push_set(SetOp {
        name: "estate_category".to_string(),
        locale: "es".to_string(),
        label: "Categoría de inmueble".to_string(),
        description: String::new(),
        active: true,
    });
    plan.push_set(SetOp {
        name: "estate_type".to_string(),
        locale: "en".to_string(),
        label: "Estate type".to_string(),
        description: String::new(),
        active: true,
    });
    plan.push_set(SetOp {
        name: "estate_type".to_string(),
        locale: "es".to_string(),
        label: "Tipo de inmueble".to_string(),
        description: String::new(),
        active: true,
    });
    plan.push_set(SetOp {
        name: "estate_subtype".to_string(),
        locale: "en".to_string(),
        label: "Estate subtype".to_string(),
        description: String::new(),
        active: true,
    });
    plan.push_set(SetOp {
        name: "estate_subtype".to_string(),
        locale: "es".to_string(),
        label: "Subtipo de inmueble".to_string(),
        description: String::new(),
        active: true,
    });

    // Options without parents
    let opt_1_residential_en = plan.push_option(OptionOp {
        set: "estate_category".to_string(),
        key: "residential".to_string(),
        locale: "en".to_string(),
        short_code: "RES".to_string(),
        label: "Residential".to_string(),
        description: String::new(),
        value: "residential".to_string(),
        order: 1,
        active: true,
        parent: None,
    });
    let opt_2_residential_es = plan.push_option(OptionOp {
        set: "estate_category".to_string(),
        key: "residential".to_string(),
        locale: "es".to_string(),
        short_code: "RES".to_string(),
        label: "Residencial".to_string(),
        description: String::new(),
        value: "residential".to_string(),
        order: 1,
        active: true,
        parent: None,
    });
    let opt_3_commercial_en = plan.push_option(OptionOp {
        set: "estate_category".to_string(),
        key: "commercial".to_string(),
        locale: "en".to_string(),
        short_code: "COM".to_string(),
        label: "Commercial".to_string(),
        description: String::new(),
        value: "commercial".to_string(),
        order: 2,
        active: true,
        parent: None,
    });
    let opt_4_commercial_es = plan.push_option(OptionOp {
        set: "estate_category".to_string(),
        key: "commercial".to_string(),
        locale: "es".to_string(),
        short_code: "COM".to_string(),
        label: "Comercial".to_string(),
        description: String::new(),
        value: "commercial".to_string(),
        order: 2,
        active: true,
        parent: None,
    });

    // Options with parents
    let opt_5_house_en = plan.push_option(OptionOp {
        set: "estate_type".to_string(),
        key: "house".to_string(),
        locale: "en".to_string(),
        short_code: "HOU".to_string(),
        label: "House".to_string(),
        description: String::new(),
        value: "house".to_string(),
        order: 1,
        active: true,
        parent: Some(opt_1_residential_en.clone()),
    });
    let opt_6_house_es = plan.push_option(OptionOp {
        set: "estate_type".to_string(),
        key: "house".to_string(),
        locale: "es".to_string(),
        short_code: "HOU".to_string(),
        label: "Casa".to_string(),
        description: String::new(),
        value: "house".to_string(),
        order: 1,
        active: true,
        parent: Some(opt_2_residential_es.clone()),
    });
    let opt_7_apartment_en = plan.push_option(OptionOp {
        set: "estate_type".to_string(),
        key: "apartment".to_string(),
        locale: "en".to_string(),
        short_code: "APT".to_string(),
        label: "Apartment".to_string(),
        description: String::new(),
        value: "apartment".to_string(),
        order: 2,
        active: true,
        parent: Some(opt_1_residential_en.clone()),
    });
    let opt_8_apartment_es = plan.push_option(OptionOp {
        set: "estate_type".to_string(),
        key: "apartment".to_string(),
        locale: "es".to_string(),
        short_code: "APT".to_string(),
        label: "Departamento".to_string(),
        description: String::new(),
        value: "apartment".to_string(),
        order: 2,
        active: true,
        parent: Some(opt_2_residential_es.clone()),
    });
    plan.push_option(OptionOp {
        set: "estate_type".to_string(),
        key: "office".to_string(),
        locale: "en".to_string(),
        short_code: "OFF".to_string(),
        label: "Office".to_string(),
        description: String::new(),
        value: "office".to_string(),
        order: 3,
        active: true,
        parent: Some(opt_3_commercial_en.clone()),
    });
    plan.push_option(OptionOp {
        set: "estate_type".to_string(),
        key: "office".to_string(),
        locale: "es".to_string(),
        short_code: "OFF".to_string(),
        label: "Oficina".to_string(),
        description: String::new(),
        value: "office".to_string(),
        order: 3,
        active: true,
        parent: Some(opt_4_commercial_es.clone()),
    });
    plan.push_option(OptionOp {
        set: "estate_subtype".to_string(),
        key: "bungalow".to_string(),
        locale: "en".to_string(),
        short_code: "BUN".to_string(),
        label: "Bungalow".to_string(),
        description: String::new(),
        value: "bungalow".to_string(),
        order: 1,
        active: true,
        parent: Some(opt_5_house_en.clone()),
    });
    plan.push_option(OptionOp {
        set: "estate_subtype".to_string(),
        key: "bungalow".to_string(),
        locale: "es".to_string(),
        short_code: "BUN".to_string(),
        label: "Bungaló".to_string(),
        description: String::new(),
        value: "bungalow".to_string(),
        order: 1,
        active: true,
        parent: Some(opt_6_house_es.clone()),
    });
    plan.push_option(OptionOp {
        set: "estate_subtype".to_string(),
        key: "penthouse".to_string(),
        locale: "en".to_string(),
        short_code: "PEN".to_string(),
        label: "Penthouse".to_string(),
        description: String::new(),
        value: "penthouse".to_string(),
        order: 2,
        active: true,
        parent: Some(opt_7_apartment_en.clone()),
    });
    plan.push_option(OptionOp {
        set: "estate_subtype".to_string(),
        key: "penthouse".to_string(),
        locale: "es".to_string(),
        short_code: "PEN".to_string(),
        label: "Penthouse".to_string(),
        description: String::new(),
        value: "penthouse".to_string(),
        order: 2,
        active: true,
        parent: Some(opt_8_apartment_es.clone()),
    });

    plan
}

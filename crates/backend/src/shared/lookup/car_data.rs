//! Built-in vendor reference data: Persian car names, brand display names
//! and the category keyword table.

use maplit::hashmap;
use std::collections::HashMap;

/// `name_fa -> (code_en, canonical name_fa, brand_code_en)`
pub fn car_map() -> HashMap<&'static str, (&'static str, &'static str, &'static str)> {
    hashmap! {
        "پژو 206" => ("peugeot-206", "پژو 206", "peugeot"),
        "پژو 206 صندوقدار" => ("peugeot-206-sd", "پژو 206 صندوقدار", "peugeot"),
        "پژو 207" => ("peugeot-207", "پژو 207", "peugeot"),
        "پژو 405" => ("peugeot-405", "پژو 405", "peugeot"),
        "پژو پارس" => ("peugeot-pars", "پژو پارس", "peugeot"),
        "پارس" => ("peugeot-pars", "پژو پارس", "peugeot"),
        "سمند" => ("samand", "سمند", "ikco"),
        "سمند ال ایکس" => ("samand-lx", "سمند ال ایکس", "ikco"),
        "دنا" => ("dena", "دنا", "ikco"),
        "دنا پلاس" => ("dena-plus", "دنا پلاس", "ikco"),
        "رانا" => ("runna", "رانا", "ikco"),
        "پیکان" => ("paykan", "پیکان", "ikco"),
        "پراید" => ("pride", "پراید", "saipa"),
        "پراید 111" => ("pride-111", "پراید 111", "saipa"),
        "پراید 131" => ("pride-131", "پراید 131", "saipa"),
        "پراید 132" => ("pride-132", "پراید 132", "saipa"),
        "تیبا" => ("tiba", "تیبا", "saipa"),
        "ساینا" => ("saina", "ساینا", "saipa"),
        "کوییک" => ("quick", "کوییک", "saipa"),
        "شاهین" => ("shahin", "شاهین", "saipa"),
        "ال 90" => ("l90", "ال 90", "renault"),
        "تندر 90" => ("l90", "ال 90", "renault"),
        "ساندرو" => ("sandero", "ساندرو", "renault"),
        "مگان" => ("megane", "مگان", "renault"),
        "ریو" => ("rio", "ریو", "kia"),
        "سراتو" => ("cerato", "سراتو", "kia"),
        "اسپورتیج" => ("sportage", "اسپورتیج", "kia"),
        "النترا" => ("elantra", "النترا", "hyundai"),
        "آوانته" => ("avante", "آوانته", "hyundai"),
        "توسان" => ("tucson", "توسان", "hyundai"),
        "سوناتا" => ("sonata", "سوناتا", "hyundai"),
        "ام وی ام 110" => ("mvm-110", "ام وی ام 110", "mvm"),
        "ام وی ام 315" => ("mvm-315", "ام وی ام 315", "mvm"),
        "ام وی ام X22" => ("mvm-x22", "ام وی ام X22", "mvm"),
    }
}

pub fn brand_display_names() -> HashMap<&'static str, &'static str> {
    hashmap! {
        "peugeot" => "پژو",
        "ikco" => "ایران خودرو",
        "saipa" => "سایپا",
        "renault" => "رنو",
        "kia" => "کیا",
        "hyundai" => "هیوندای",
        "mvm" => "ام وی ام",
    }
}

/// Ordered: the first key whose keywords match wins, so specific keys
/// ("oil filter") come before generic ones ("oil").
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("oil_filter", &["فیلتر روغن"]),
    ("air_filter", &["فیلتر هوا"]),
    ("fuel_filter", &["فیلتر بنزین", "فیلتر سوخت"]),
    ("cabin_filter", &["فیلتر کابین"]),
    ("engine_oil", &["روغن موتور", "روغن"]),
    ("brake_pad", &["لنت"]),
    ("brake_disc", &["دیسک ترمز", "دیسک"]),
    ("spark_plug", &["شمع"]),
    ("timing_belt", &["تسمه تایم", "تسمه"]),
    ("shock_absorber", &["کمک فنر"]),
    ("lights", &["چراغ"]),
    ("battery", &["باتری"]),
    ("radiator", &["رادیاتور"]),
    ("gasket", &["واشر"]),
    ("bearing", &["بلبرینگ"]),
    ("clutch", &["کلاچ"]),
];

pub fn category_paths() -> HashMap<&'static str, Vec<&'static str>> {
    hashmap! {
        "oil_filter" => vec!["لوازم یدکی", "فیلتر", "فیلتر روغن"],
        "air_filter" => vec!["لوازم یدکی", "فیلتر", "فیلتر هوا"],
        "fuel_filter" => vec!["لوازم یدکی", "فیلتر", "فیلتر بنزین"],
        "cabin_filter" => vec!["لوازم یدکی", "فیلتر", "فیلتر کابین"],
        "engine_oil" => vec!["لوازم مصرفی", "روغن موتور"],
        "brake_pad" => vec!["لوازم یدکی", "سیستم ترمز", "لنت ترمز"],
        "brake_disc" => vec!["لوازم یدکی", "سیستم ترمز", "دیسک ترمز"],
        "spark_plug" => vec!["لوازم یدکی", "سیستم جرقه", "شمع"],
        "timing_belt" => vec!["لوازم یدکی", "موتور", "تسمه"],
        "shock_absorber" => vec!["لوازم یدکی", "سیستم تعلیق", "کمک فنر"],
        "lights" => vec!["لوازم یدکی", "برق خودرو", "چراغ"],
        "battery" => vec!["لوازم یدکی", "برق خودرو", "باتری"],
        "radiator" => vec!["لوازم یدکی", "سیستم خنک کاری", "رادیاتور"],
        "gasket" => vec!["لوازم یدکی", "موتور", "واشر"],
        "bearing" => vec!["لوازم یدکی", "بلبرینگ"],
    }
}

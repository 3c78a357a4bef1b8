//! The organization's production request schema and legacy aliases.
//!
//! Tags are the exact multi-language option labels used by the intake form and
//! must match record values byte for byte.

use super::{ItemRule, RequestSchema, SchemaItem, SchemaModel};
use std::collections::BTreeMap;

pub const PHONE_FIELD: &str = "Phone Number";

pub const FOOD_REQUESTS_FIELD: &str = "Food Requests?";
pub const FOOD_STATUS_FIELD: &str = "Food Request Status";
pub const FOOD_MISSED_APPT_STATUS: &str = "Missed Food Distro Appt";

pub const EG_REQUESTS_FIELD: &str = "Essential Goods Requests?";
pub const EG_STATUS_FIELD: &str = "Essential Goods Requests Status";
pub const EG_MISSED_APPT_STATUS: &str = "Missed EG Distro Appt";

pub const SOCIAL_SERVICES_REQUESTS_FIELD: &str = "Social Services Requests?";
pub const SOCIAL_SERVICES_STATUS_FIELD: &str = "Social Services Request Status";

pub const KITCHEN_REQUESTS_FIELD: &str = "Which Kitchen Items";
pub const FURNITURE_REQUESTS_FIELD: &str = "Which Furniture Items";
pub const BED_REQUESTS_FIELD: &str = "Bed Needs";
pub const OLD_BED_REQUESTS_FIELD: &str = "Which Bed Size";

pub const FOOD_REQUEST_GROCERIES: &str = "Alimentos / Groceries / 食品";
pub const FOOD_REQUEST_HOT_MEALS: &str = "Comida caliente / Hot meals / 热食";

pub const EG_REQUEST_SOAP: &str =
    "Jabón & Productos de baño / Soap & Shower Products / 肥皂和淋浴用品";
pub const EG_REQUEST_PADS: &str =
    "Productos Femenino - Toallitas / Feminine Products - Pads / 衛生巾";
pub const EG_REQUEST_BABY_DIAPERS: &str = "Pañales / Baby Diapers / 嬰兒紙尿褲";
pub const EG_REQUEST_CLOTHING: &str = "Ropa / Clothing / 服裝";
pub const EG_REQUEST_SCHOOL_SUPPLIES: &str = "Cosas de Escuela / School Supplies / 學校用品";
pub const EG_REQUEST_FURNITURE: &str = "Muebles / Furniture / 家具";
pub const EG_REQUEST_KITCHEN_SUPPLIES: &str = "Cosas de Cocina / Kitchen Supplies / 廚房用品";

pub const KITCHEN_REQUEST_POTS_AND_PANS: &str = "Ollas y Sartenes / Pots & Pans / 鍋碗瓢盆";
pub const KITCHEN_REQUEST_PLATES: &str = "Platos / Plates / 盤子";

pub const FURNITURE_REQUEST_BED: &str = "Cama / Bed / 床";
pub const FURNITURE_REQUEST_DRESSER: &str = "Cajonera / Clothes Dresser / 衣櫃";
pub const FURNITURE_REQUEST_DINING_TABLE: &str = "Mesa Para Comedor / Dining Room Table / 餐桌";

pub const BED_REQUEST_QUEEN_SET: &str =
    "Cama tamaño Queen / Queen Mattress + Frame / 雙人加大床墊+床架";

pub const SS_REQUEST_ENGLISH_CLASSES: &str = "Clases de inglés / English Classes / 英語課";
pub const SS_REQUEST_HOUSING: &str = "Asistencia asegurando vivienda/ Securing housing / 住房協助";
pub const SS_REQUEST_FOOD_BENEFITS: &str =
    "Asistencia con beneficios de comida / Assistance with food benefits / 食品福利協助（WIC, SNAP, P-EBT）";

const ALL_SOCIAL_SERVICES_TIMEOUT: &str = "All Social Services Timeout";

impl SchemaModel {
    /// Food, essential goods (with kitchen and furniture/bed nesting), and
    /// social services, plus the aliases for renamed fields and retired tag
    /// spellings found in older records.
    pub fn standard() -> Self {
        Self {
            schemas: vec![food_schema(), essential_goods_schema(), social_services_schema()],
            field_aliases: field_aliases(),
            tag_aliases: tag_aliases(),
        }
    }
}

fn rule(delivered: &str, timeout: &str) -> ItemRule {
    ItemRule::new(&[delivered], &[timeout])
}

fn eg_rule(delivered: &str, timeout: &str) -> ItemRule {
    rule(delivered, timeout).with_missed(EG_MISSED_APPT_STATUS)
}

// Bed sizes also close on the furniture-level "Mattress Delivered" /
// "Bed Frame Delivered" tags that were used before per-size tags existed.
fn bed_rule(delivered: &str, timeout: &str) -> ItemRule {
    rule(delivered, timeout).inheriting_delivered()
}

fn social_rule(delivered: &[&str], timeout: &str) -> ItemRule {
    ItemRule::new(delivered, &[timeout, ALL_SOCIAL_SERVICES_TIMEOUT])
}

fn food_schema() -> RequestSchema {
    RequestSchema::new(
        FOOD_REQUESTS_FIELD,
        FOOD_STATUS_FIELD,
        vec![
            SchemaItem::new(
                FOOD_REQUEST_GROCERIES,
                rule("Groceries Delivered", "Groceries Request Timeout")
                    .with_missed(FOOD_MISSED_APPT_STATUS),
            ),
            SchemaItem::new(
                FOOD_REQUEST_HOT_MEALS,
                rule("Hot Food Delivered", "Hot Food Request Timeout"),
            ),
        ],
    )
}

fn essential_goods_schema() -> RequestSchema {
    RequestSchema::new(
        EG_REQUESTS_FIELD,
        EG_STATUS_FIELD,
        vec![
            SchemaItem::new(
                EG_REQUEST_SOAP,
                eg_rule("Soap & Shower Products Delivered", "Soap & Shower Products Timeout"),
            ),
            SchemaItem::new(EG_REQUEST_PADS, eg_rule("Pads Delivered", "Pads Timeout")),
            SchemaItem::new(
                EG_REQUEST_BABY_DIAPERS,
                eg_rule("Baby Diapers Delivered", "Baby Diapers Timeout"),
            ),
            SchemaItem::new(
                "Pañales de adultos / Adult Diapers / 成人紙尿褲",
                eg_rule("Adult Diapers Delivered", "Adult Diapers Timeout"),
            ),
            SchemaItem::new(
                EG_REQUEST_CLOTHING,
                eg_rule("Clothing Assistance Delivered", "Clothing Assistance Timeout"),
            ),
            SchemaItem::new(
                EG_REQUEST_SCHOOL_SUPPLIES,
                eg_rule("School Supplies Delivered", "School Supplies Timeout"),
            ),
            SchemaItem::new(
                EG_REQUEST_KITCHEN_SUPPLIES,
                eg_rule("Kitchen Supplies Delivered", "Kitchen Supplies Timeout")
                    .with_items(kitchen_schema()),
            ),
            SchemaItem::new(
                EG_REQUEST_FURNITURE,
                eg_rule("Furniture Delivered", "Furniture Timeout")
                    .with_items(furniture_schema()),
            ),
            SchemaItem::new(
                "Coche / Stroller / 嬰兒車",
                eg_rule("Stroller Delivered", "Stroller Timeout"),
            ),
            SchemaItem::new(
                "Comida de mascota / Pet Food / 寵物食品",
                eg_rule("Pet Food Delivered", "Pet Food Timeout"),
            ),
            SchemaItem::new(
                "Historical: Mascaras / Masks / 口罩",
                eg_rule("Masks Delivered", "Masks Timeout").historical(),
            ),
            SchemaItem::new(
                "Historical: Productos Femenino - Tampones / Feminine Products - Tampons / 衛生棉條",
                eg_rule("Tampons Delivered", "Tampons Timeout").historical(),
            ),
            SchemaItem::new(
                "Historical: Comida para bebé / Baby Food / 嬰兒食品",
                eg_rule("Baby Food Delivered", "Baby Food Timeout").historical(),
            ),
            SchemaItem::new(
                "Historical: Formulario para bebé / Baby Formula / 嬰儿奶粉",
                eg_rule("Baby Formula Delivered", "Baby Formula Timeout").historical(),
            ),
        ],
    )
}

fn kitchen_schema() -> RequestSchema {
    RequestSchema::new(
        KITCHEN_REQUESTS_FIELD,
        EG_STATUS_FIELD,
        vec![
            SchemaItem::new(
                "Microondas / Microwave / 微波爐",
                rule("Microwave Delivered", "Microwave Timeout"),
            ),
            SchemaItem::new(
                KITCHEN_REQUEST_POTS_AND_PANS,
                rule("Pots & Pans Delivered", "Pots & Pans Timeout"),
            ),
            SchemaItem::new(
                KITCHEN_REQUEST_PLATES,
                rule("Plates Delivered", "Plates Timeout"),
            ),
            SchemaItem::new(
                "Tazas / Cups / 杯子",
                rule("Cups Delivered", "Cups Timeout"),
            ),
            SchemaItem::new(
                "Utensilios / Utensils / 餐具",
                rule("Utensils Delivered", "Utensils Timeout"),
            ),
            SchemaItem::new(
                "Cafetera / Coffee Maker / 咖啡機",
                rule("Coffee Maker Delivered", "Coffee Maker Timeout"),
            ),
            SchemaItem::new(
                "Otras / Other / 其他廚房用品",
                rule("Kitchen Supplies Delivered", "Kitchen Supplies Timeout"),
            ),
            SchemaItem::new(
                "Licuadora / Blender / 攪拌機",
                rule(
                    "Blender / Food Processor Delivered",
                    "Blender / Food Processor Timeout",
                ),
            ),
        ],
    )
}

fn furniture_schema() -> RequestSchema {
    RequestSchema::new(
        FURNITURE_REQUESTS_FIELD,
        EG_STATUS_FIELD,
        vec![
            SchemaItem::new(
                FURNITURE_REQUEST_BED,
                ItemRule::new(
                    &["Mattress Delivered", "Bed Frame Delivered"],
                    &["Mattress Timeout", "Bed Frame Timeout"],
                )
                .with_items(bed_schema()),
            ),
            SchemaItem::new("Sofa / Sofa / 沙發", rule("Sofa Delivered", "Sofa Timeout")),
            SchemaItem::new(
                FURNITURE_REQUEST_DRESSER,
                rule("Dresser Delivered", "Dresser Timeout"),
            ),
            SchemaItem::new(
                "Escritorio / Desk /  書桌",
                rule("Desk Delivered", "Desk Timeout"),
            ),
            SchemaItem::new(
                "Mesa de centro / Coffee Table / 咖啡桌",
                rule("Coffee Table Delivered", "Coffee Table Timeout"),
            ),
            SchemaItem::new(
                "Sillas / Chairs / 椅子",
                rule("Chairs Delivered", "Chairs Timeout"),
            ),
            SchemaItem::new(
                "Almacenamiento / Storage / 儲物櫃",
                rule("Storage Delivered", "Storage Timeout"),
            ),
            SchemaItem::new(
                FURNITURE_REQUEST_DINING_TABLE,
                rule("Dining Table Delivered", "Dining Table Timeout"),
            ),
            SchemaItem::new(
                "Nevera / Refrigerator / 冰箱",
                rule("Fridge Delivered", "Fridge Timeout"),
            ),
            SchemaItem::new(
                "Aire conditionador / Air Conditioner / 空調",
                rule("AC Delivered", "AC Timeout"),
            ),
            SchemaItem::new(
                "Otras / Other / 其他家具",
                rule("Other Furniture Delivered", "Other Furniture Timeout"),
            ),
        ],
    )
}

fn bed_schema() -> RequestSchema {
    RequestSchema::new(
        BED_REQUESTS_FIELD,
        EG_STATUS_FIELD,
        vec![
            SchemaItem::new("Cuna / Crib / 嬰兒床", bed_rule("Crib Delivered", "Crib Timeout")),
            SchemaItem::new(
                "Colchón individual / Twin Mattress / 單人床墊",
                bed_rule("Twin Mattress Delivered", "Twin Mattress Timeout"),
            ),
            SchemaItem::new(
                "Colchón matrimonio / Full Mattress / 雙人床墊",
                bed_rule("Full Mattress Delivered", "Full Mattress Timeout"),
            ),
            SchemaItem::new(
                "Colchón tamaño Queen / Queen Mattress / 雙人加大床墊",
                bed_rule("Queen Mattress Delivered", "Queen Mattress Timeout"),
            ),
            SchemaItem::new(
                "Colchón tamaño King / King Mattress / 雙人特大床墊",
                bed_rule("King Mattress Delivered", "King Mattress Timeout"),
            ),
            SchemaItem::new(
                "Cama individual / Twin Mattress + Frame / 單人床墊+床架",
                bed_rule("Twin Bed Set Delivered", "Twin Bed Set Timeout"),
            ),
            SchemaItem::new(
                "Cama matrimonio / Full Mattress + Frame / 雙人床墊+床架",
                bed_rule("Full Bed Set Delivered", "Full Bed Set Timeout"),
            ),
            SchemaItem::new(
                BED_REQUEST_QUEEN_SET,
                bed_rule("Queen Bed Set Delivered", "Queen Bed Set Timeout"),
            ),
            SchemaItem::new(
                "Cama tamaño King / King Mattress + Frame / 雙人特大床墊+床架",
                bed_rule("King Bed Set Delivered", "King Bed Set Timeout"),
            ),
            SchemaItem::new(
                "Bastidor individual / Twin Bed Frame 單人床架",
                bed_rule("Twin Bed Frame Delivered", "Twin Bed Frame Timeout"),
            ),
            SchemaItem::new(
                "Bastidor matrimonio / Full Bed Frame / 雙人床架",
                bed_rule("Full Bed Frame Delivered", "Full Bed Frame Timeout"),
            ),
            SchemaItem::new(
                "Bastidor tamaño Queen / Queen Bed Frame / 雙人加大床架",
                bed_rule("Queen Bed Frame Delivered", "Queen Bed Frame Timeout"),
            ),
            SchemaItem::new(
                "Bastidor tamaño King / King Bed Frame / 雙人特大床架",
                bed_rule("King Bed Frame Delivered", "King Bed Frame Timeout"),
            ),
            SchemaItem::new(
                "Litera / Loft or Bunk Bed / 閣樓床或上下床",
                bed_rule("Loft/Bunk Bed Delivered", "Loft/Bunk Bed Timeout"),
            ),
        ],
    )
}

fn social_services_schema() -> RequestSchema {
    RequestSchema::new(
        SOCIAL_SERVICES_REQUESTS_FIELD,
        SOCIAL_SERVICES_STATUS_FIELD,
        vec![
            SchemaItem::new(
                "Asistencia legal de inquilinos / Tenant legal assistance / 租戶法律協助",
                social_rule(
                    &["Tenant Support Delivered - CUFFH"],
                    "Tenant Legal Assistance Timeout",
                ),
            ),
            SchemaItem::new(
                "Asistencia con servicios escolares / Assistance with in-school services / 學校服務協助",
                social_rule(
                    &["In School Services Assistance Delivered"],
                    "In School Services Assistance Timeout",
                ),
            ),
            SchemaItem::new(
                "Tutoría estudiantil / Tutoring for students / 學生輔導",
                social_rule(&["Tutoring Assigned (K-12)"], "Tutoring Assistance Timeout"),
            ),
            SchemaItem::new(
                SS_REQUEST_ENGLISH_CLASSES,
                social_rule(
                    &[
                        "Referred to FeLT for English Classes",
                        "English Classes Signup, Confirmed by OBT",
                        "English Classes Signup, confirmed by DOE",
                        "Registered for DOE ESL Classes",
                        "ContraCovid - English Class Intake Scheduled",
                    ],
                    "English Classes Timeout",
                )
                .with_invalid(&["No Longer Interested - English Classes"]),
            ),
            SchemaItem::new(
                SS_REQUEST_HOUSING,
                social_rule(
                    &[
                        "Referred to Riseboro for Housing Assistance",
                        "ContraCovid - Housing Intake Scheduled",
                    ],
                    "Securing Housing Timeout",
                ),
            ),
            SchemaItem::new(
                "Asistencia con seguro médico / Medical insurance support / 醫療保險協助",
                social_rule(
                    &[
                        "Enrolled in Health Insurance - Metroplus",
                        "Health Insurance Secured - HFNYC",
                        "ContraCovid - Health Insurance Intake Scheduled",
                    ],
                    "Health Insurance Assistance Timeout",
                )
                .with_invalid(&["Already has Health Insurance"]),
            ),
            SchemaItem::new(
                "Asistencia de Negocios / Small Business Support / 小型企業協助",
                social_rule(
                    &["Small Business Support Delivered"],
                    "Small Business Support Timeout",
                ),
            ),
            SchemaItem::new(
                "Internet de bajo costo en casa / Low-Cost Internet at home / 網絡連結協助",
                social_rule(
                    &["Low-Cost Internet Access Delivered - MESH"],
                    "Low-Cost Internet Access Timeout",
                ),
            ),
            SchemaItem::new(
                SS_REQUEST_FOOD_BENEFITS,
                social_rule(
                    &[
                        "SNAP Signup Completed through WSCAH",
                        "WIC Signup Completed through WSCAH",
                        "ContraCovid - Food Benefits Intake Scheduled",
                    ],
                    "Food Benefits Assistance Timeout",
                )
                .with_invalid(&[
                    "No Longer Interested in Food Benefits",
                    "Not Eligible for Food Benefits HFNYC",
                    "Not Eligible for Food Benefits WSCAH",
                    "Already has SNAP - WSCAH",
                    "Already has P-EBT - HFNYC",
                    "Already has SNAP - HFNYC",
                    "Already has WIC - HFNYC",
                    "Cannot Sign Up for Food Benefits - HFNYC",
                ]),
            ),
            SchemaItem::new(
                "Asistencia con Transporte / Transportation Assistance / 交通運輸協助",
                social_rule(&["MetroCard Delivered"], "MetroCard Request Timeout"),
            ),
            SchemaItem::new(
                "Asistencia para niños discapacitados / Assistance for disabled children / 殘疾兒童協助",
                social_rule(
                    &["Child Disability Assistance Delivered"],
                    "Child Disability Assistance Timeout",
                ),
            ),
            SchemaItem::new(
                "Asistencia para mascotas / Pet Assistance / 寵物協助",
                social_rule(&["Pet Assistance Delivered"], "Pet Assistance Timeout"),
            ),
        ],
    )
}

fn field_aliases() -> BTreeMap<String, String> {
    [(OLD_BED_REQUESTS_FIELD, BED_REQUESTS_FIELD)]
        .into_iter()
        .map(|(old, new)| (old.to_string(), new.to_string()))
        .collect()
}

fn tag_aliases() -> BTreeMap<String, String> {
    const RETIRED_TAGS: &[(&str, &str)] = &[
        // Food
        ("Alimentos / Groceries / 杂货", FOOD_REQUEST_GROCERIES),
        // Essential goods
        ("Pañales / Baby Diapers / 婴儿纸尿裤", EG_REQUEST_BABY_DIAPERS),
        (
            "Pañales de adultos / Adult Diapers / 成人纸尿裤",
            "Pañales de adultos / Adult Diapers / 成人紙尿褲",
        ),
        (
            "Jabón & Productos de baño / Soap & Shower Products / 肥皂和淋浴产品",
            EG_REQUEST_SOAP,
        ),
        (
            "Productos Femenino - Toallitas / Feminine Products - Pads / 卫生巾",
            EG_REQUEST_PADS,
        ),
        ("Cosas de Escuela / School Supplies / 学校用品", EG_REQUEST_SCHOOL_SUPPLIES),
        ("Ropa / Clothing / 服装协助", EG_REQUEST_CLOTHING),
        ("Muebles / Furniture / 家俱", EG_REQUEST_FURNITURE),
        ("Cosas de Cocina / Kitchen Supplies / 厨房用品", EG_REQUEST_KITCHEN_SUPPLIES),
        ("Coche / Stroller / 婴儿车", "Coche / Stroller / 嬰兒車"),
        (
            "Historical: Productos Femenino - Tampones / Feminine Products - Tampons / 卫生棉条",
            "Historical: Productos Femenino - Tampones / Feminine Products - Tampons / 衛生棉條",
        ),
        // Furniture
        ("Cajonera / Clothes Dresser / 衣服梳妆台", FURNITURE_REQUEST_DRESSER),
        ("Escritorio / Desk /  书桌", "Escritorio / Desk /  書桌"),
        ("Almacenamiento / Storage / 存储", "Almacenamiento / Storage / 儲物櫃"),
        (
            "Aire conditionador / Air Conditioner / 冷气机",
            "Aire conditionador / Air Conditioner / 空調",
        ),
        // Kitchen; the old "Other" spelling was shared with furniture and
        // resolved to the kitchen option.
        ("Otras / Other / 其他东西", "Otras / Other / 其他廚房用品"),
        ("Microondas / Microwave / 微波", "Microondas / Microwave / 微波爐"),
        ("Ollas y Sartenes / Pots & Pans / 锅碗瓢盆", KITCHEN_REQUEST_POTS_AND_PANS),
        ("Platos / Plates / 板块", KITCHEN_REQUEST_PLATES),
        ("Tazas / Cups / 杯具", "Tazas / Cups / 杯子"),
        ("Cafetera / Coffee Maker / 咖啡机", "Cafetera / Coffee Maker / 咖啡機"),
        // Beds
        ("Cuna / Crib / 婴儿床", "Cuna / Crib / 嬰兒床"),
        (
            "Colchón individual / Twin Mattress / 双人床垫",
            "Colchón individual / Twin Mattress / 單人床墊",
        ),
        (
            "Colchón matrimonio / Full Mattress / 全床垫",
            "Colchón matrimonio / Full Mattress / 雙人床墊",
        ),
        (
            "Colchón tamaño Queen / Queen Mattress / 女王床垫",
            "Colchón tamaño Queen / Queen Mattress / 雙人加大床墊",
        ),
        (
            "Colchón tamaño King / King Mattress / 国王床垫",
            "Colchón tamaño King / King Mattress / 雙人特大床墊",
        ),
        (
            "Cama individual / Twin Mattress + Frame / 双人床垫+框架",
            "Cama individual / Twin Mattress + Frame / 單人床墊+床架",
        ),
        (
            "Cama matrimonio / Full Mattress + Frame / 完整的床垫和框架",
            "Cama matrimonio / Full Mattress + Frame / 雙人床墊+床架",
        ),
        (
            "Cama tamaño Queen / Queen Mattress + Frame / 全床垫+框架",
            BED_REQUEST_QUEEN_SET,
        ),
        (
            "Cama tamaño King / King Mattress + Frame / 国王床垫+框架",
            "Cama tamaño King / King Mattress + Frame / 雙人特大床墊+床架",
        ),
        (
            "Bastidor individual / Twin Bed Frame 双人床垫框架",
            "Bastidor individual / Twin Bed Frame 單人床架",
        ),
        (
            "Bastidor matrimonio / Full Bed Frame / 全床垫框架",
            "Bastidor matrimonio / Full Bed Frame / 雙人床架",
        ),
        (
            "Bastidor tamaño Queen / Queen Bed Frame / 女王床垫框架",
            "Bastidor tamaño Queen / Queen Bed Frame / 雙人加大床架",
        ),
        (
            "Bastidor tamaño King / King Bed Frame / 国王床垫框架",
            "Bastidor tamaño King / King Bed Frame / 雙人特大床架",
        ),
        (
            "Litera / Loft or Bunk Bed",
            "Litera / Loft or Bunk Bed / 閣樓床或上下床",
        ),
        // Social services
        (
            "Asistencia legal de inquilinos / Tenant legal assistance / 租户法律援助",
            "Asistencia legal de inquilinos / Tenant legal assistance / 租戶法律協助",
        ),
        (
            "Asistencia con servicios escolares / Assistance with in-school services / 公立学校入学",
            "Asistencia con servicios escolares / Assistance with in-school services / 學校服務協助",
        ),
        (
            "Tutoría estudiantil / Tutoring for students / 学生辅导",
            "Tutoría estudiantil / Tutoring for students / 學生輔導",
        ),
        ("Clases de inglés / English Classes / 英语课", SS_REQUEST_ENGLISH_CLASSES),
        (
            "Asistencia asegurando vivienda/ Securing housing / 住房援助",
            SS_REQUEST_HOUSING,
        ),
        (
            "Asistencia con seguro médico / Medical insurance support / 医疗保健",
            "Asistencia con seguro médico / Medical insurance support / 醫療保險協助",
        ),
        (
            "Asistencia de Negocios / Small Business Support / 小型企业支持",
            "Asistencia de Negocios / Small Business Support / 小型企業協助",
        ),
        (
            "Internet de bajo costo en casa / Low-Cost Internet at home / 在家上网",
            "Internet de bajo costo en casa / Low-Cost Internet at home / 網絡連結協助",
        ),
        (
            "Asistencia con beneficios de comida / Assistance with food benefits / 协助 - WIC, SNAP, P-EBT",
            SS_REQUEST_FOOD_BENEFITS,
        ),
        (
            "Asistencia con Transporte / Transportation Assistance",
            "Asistencia con Transporte / Transportation Assistance / 交通運輸協助",
        ),
        (
            "Asistencia para niños discapacitados / Assistance for disabled children / 残疾儿童援助",
            "Asistencia para niños discapacitados / Assistance for disabled children / 殘疾兒童協助",
        ),
        (
            "Asistencia para mascotas / Pet Assistance / 宠物协助",
            "Asistencia para mascotas / Pet Assistance / 寵物協助",
        ),
    ];

    RETIRED_TAGS
        .iter()
        .map(|(old, canonical)| (old.to_string(), canonical.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_schema_passes_validation() {
        let standard = SchemaModel::standard();
        let validated = SchemaModel::new(
            standard.schemas().to_vec(),
            standard.field_aliases().clone(),
            standard.tag_aliases().clone(),
        )
        .expect("standard schema is valid");
        assert_eq!(validated, standard);
    }

    #[test]
    fn standard_schema_nests_beds_two_levels_deep() {
        let standard = SchemaModel::standard();
        let (eg, furniture) = standard
            .top_level_item(EG_REQUEST_FURNITURE)
            .expect("furniture is a top-level essential goods item");
        assert_eq!(eg.request_field, EG_REQUESTS_FIELD);

        let furniture_items = furniture.nested().expect("furniture has sub-items");
        assert_eq!(furniture_items.request_field, FURNITURE_REQUESTS_FIELD);

        let bed = furniture_items
            .rule(FURNITURE_REQUEST_BED)
            .expect("bed is a furniture item");
        let beds = bed.nested().expect("bed has sizes");
        assert_eq!(beds.request_field, BED_REQUESTS_FIELD);
        assert!(beds
            .items
            .iter()
            .all(|item| item.rule.inherit_delivered_from_parent));
    }

    #[test]
    fn every_alias_targets_a_known_tag() {
        let standard = SchemaModel::standard();
        let known: Vec<&str> = standard.flatten().iter().map(|item| item.tag).collect();
        for (alias, canonical) in standard.tag_aliases() {
            assert!(
                known.contains(&canonical.as_str()),
                "alias {alias} points at unknown tag {canonical}"
            );
        }
        assert_eq!(standard.canonical_field(OLD_BED_REQUESTS_FIELD), BED_REQUESTS_FIELD);
    }

    #[test]
    fn historical_items_are_marked_inactive() {
        let standard = SchemaModel::standard();
        let inactive: Vec<&str> = standard
            .flatten()
            .iter()
            .filter(|item| !item.rule.active)
            .map(|item| item.tag)
            .collect();
        assert_eq!(inactive.len(), 4);
        assert!(inactive.iter().all(|tag| tag.starts_with("Historical:")));
    }
}

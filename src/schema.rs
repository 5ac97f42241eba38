//! Static descriptors for the USDA SR28 reference tables.
//!
//! Each table is described once, at compile time, by an [`EntityDescriptor`].
//! The importer resolves its field lists against these descriptors, the browse
//! API exposes them as a capability query, and `migrations/` holds the matching
//! DDL. Table and column names follow the layout the admin tooling expects
//! (`usda_nutrition_<model>`), so they must not drift from the migrations.
//!
//! Descriptors are ordered so that every foreign key points at an entity that
//! appears earlier in [`entities`].

use serde::Serialize;
use std::fmt;

/// The seven reference tables of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    DerivationCode,
    FoodGroup,
    FoodDescription,
    Weight,
    SourceCode,
    NutrientDefinition,
    Footnote,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::DerivationCode,
        EntityKind::FoodGroup,
        EntityKind::FoodDescription,
        EntityKind::Weight,
        EntityKind::SourceCode,
        EntityKind::NutrientDefinition,
        EntityKind::Footnote,
    ];

    /// Snake-case name used on the command line and in URLs.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn descriptor(self) -> &'static EntityDescriptor {
        match self {
            EntityKind::DerivationCode => &DERIVATION_CODE,
            EntityKind::FoodGroup => &FOOD_GROUP,
            EntityKind::FoodDescription => &FOOD_DESCRIPTION,
            EntityKind::Weight => &WEIGHT,
            EntityKind::SourceCode => &SOURCE_CODE,
            EntityKind::NutrientDefinition => &NUTRIENT_DEFINITION,
            EntityKind::Footnote => &FOOTNOTE,
        }
    }

    /// Resolve an entity from its snake-case or CamelCase name.
    ///
    /// Matching ignores case and underscores, so `food_group`, `FoodGroup`
    /// and `foodgroup` all resolve to [`EntityKind::FoodGroup`].
    pub fn from_name(name: &str) -> Option<EntityKind> {
        let wanted: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        EntityKind::ALL.into_iter().find(|kind| {
            let candidate: String = kind.name().chars().filter(|c| *c != '_').collect();
            candidate == wanted
        })
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic type of a column, mirroring the upstream data dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Bounded character data.
    Char { max_length: u16 },
    /// `Y`/`N` flag in the source files, nullable boolean in storage.
    Boolean,
    /// Non-negative `SMALLINT`.
    SmallUnsigned,
    /// Fixed precision `NUMERIC(max_digits, decimal_places)`.
    Decimal { max_digits: u8, decimal_places: u8 },
    /// Character key referencing the primary key of `target`.
    ForeignKey { target: EntityKind, max_length: u16 },
    /// Surrogate `SERIAL` key assigned by the database.
    AutoId,
}

impl FieldKind {
    /// Cast applied to the text array element when inserting this column.
    ///
    /// Character columns are assigned without a cast so PostgreSQL rejects
    /// over-long values instead of truncating them.
    pub fn insert_cast(self) -> Option<&'static str> {
        match self {
            FieldKind::SmallUnsigned => Some("integer"),
            FieldKind::Decimal { .. } => Some("numeric"),
            FieldKind::Char { .. }
            | FieldKind::Boolean
            | FieldKind::ForeignKey { .. }
            | FieldKind::AutoId => None,
        }
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, FieldKind::Boolean)
    }
}

/// Column-level metadata for one field of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub nullable: bool,
    pub primary_key: bool,
    pub choices: &'static [(&'static str, &'static str)],
    pub help: &'static str,
}

impl FieldDescriptor {
    const fn required(name: &'static str, kind: FieldKind, help: &'static str) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            primary_key: false,
            choices: &[],
            help,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind, help: &'static str) -> Self {
        Self {
            nullable: true,
            ..Self::required(name, kind, help)
        }
    }

    const fn key(name: &'static str, kind: FieldKind, help: &'static str) -> Self {
        Self {
            primary_key: true,
            ..Self::required(name, kind, help)
        }
    }

    const fn with_choices(self, choices: &'static [(&'static str, &'static str)]) -> Self {
        Self { choices, ..self }
    }

    /// Whether the value comes from the source files rather than the database.
    pub fn is_importable(&self) -> bool {
        !matches!(self.kind, FieldKind::AutoId)
    }
}

/// Table-level metadata for one entity.
#[derive(Debug, Serialize)]
pub struct EntityDescriptor {
    pub kind: EntityKind,
    pub name: &'static str,
    pub table: &'static str,
    pub fields: &'static [FieldDescriptor],
    /// Columns shown in list views.
    pub list_display: &'static [&'static str],
}

impl EntityDescriptor {
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        let fields: &'static [FieldDescriptor] = self.fields;
        fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.name).collect()
    }

    pub fn primary_key(&self) -> Option<&'static FieldDescriptor> {
        let fields: &'static [FieldDescriptor] = self.fields;
        fields.iter().find(|field| field.primary_key)
    }

    /// Entities this one references, in field order, without duplicates.
    pub fn foreign_key_targets(&self) -> Vec<EntityKind> {
        let mut targets = Vec::new();
        for field in self.fields {
            if let FieldKind::ForeignKey { target, .. } = field.kind {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
        targets
    }

    /// Every field is read-only once imported.
    pub fn readonly_field_names(&self) -> Vec<&'static str> {
        self.field_names()
    }

    /// Fields an operator may change after import. Reference rows are only
    /// ever replaced by a fresh load, so this is always empty.
    pub fn editable_field_names(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

const NDB_NO_HELP: &str = "5-digit Nutrient Databank number that uniquely identifies a food item.";

const FOOTNOTE_TYPES: &[(&str, &str)] = &[
    ("D", "footnote adding information to the food description"),
    ("M", "footnote adding information to measure description"),
    ("N", "footnote providing additional information on a nutrient value"),
];

pub static DERIVATION_CODE: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::DerivationCode,
    name: "derivation_code",
    table: "usda_nutrition_derivationcode",
    fields: &[
        FieldDescriptor::key("code", FieldKind::Char { max_length: 4 }, "Derivation code."),
        FieldDescriptor::required(
            "description",
            FieldKind::Char { max_length: 120 },
            "How the value was determined.",
        ),
    ],
    list_display: &["code", "description"],
};

pub static FOOD_GROUP: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::FoodGroup,
    name: "food_group",
    table: "usda_nutrition_foodgroup",
    fields: &[
        FieldDescriptor::key(
            "code",
            FieldKind::Char { max_length: 4 },
            "4-digit code identifying a food group.",
        ),
        FieldDescriptor::required(
            "description",
            FieldKind::Char { max_length: 60 },
            "Name of food group.",
        ),
    ],
    list_display: &["code", "description"],
};

pub static FOOD_DESCRIPTION: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::FoodDescription,
    name: "food_description",
    table: "usda_nutrition_fooddescription",
    fields: &[
        FieldDescriptor::key("ndb_no", FieldKind::Char { max_length: 5 }, NDB_NO_HELP),
        FieldDescriptor::required(
            "food_group_id",
            FieldKind::ForeignKey {
                target: EntityKind::FoodGroup,
                max_length: 4,
            },
            "Food group to which the food item belongs.",
        ),
        FieldDescriptor::required(
            "long_desc",
            FieldKind::Char { max_length: 200 },
            "200-character description of food item.",
        ),
        FieldDescriptor::required(
            "short_desc",
            FieldKind::Char { max_length: 60 },
            "60-character abbreviated description of food item.",
        ),
        FieldDescriptor::optional(
            "com_name",
            FieldKind::Char { max_length: 100 },
            "Other names commonly used to describe the food.",
        ),
        FieldDescriptor::optional(
            "manufacturer_name",
            FieldKind::Char { max_length: 65 },
            "Company that manufactured the product.",
        ),
        FieldDescriptor::optional(
            "survey",
            FieldKind::Boolean,
            "Whether the food is used in the FNDDS and has a complete nutrient profile.",
        ),
        FieldDescriptor::optional(
            "refuse_description",
            FieldKind::Char { max_length: 135 },
            "Description of inedible parts of the food item.",
        ),
        FieldDescriptor::optional("refuse", FieldKind::SmallUnsigned, "Percentage of refuse."),
        FieldDescriptor::optional(
            "scientific_name",
            FieldKind::Char { max_length: 65 },
            "Scientific name of the least processed form of the food.",
        ),
        FieldDescriptor::optional(
            "nitrogen_factor",
            FieldKind::Decimal {
                max_digits: 6,
                decimal_places: 2,
            },
            "Factor for converting nitrogen to protein.",
        ),
        FieldDescriptor::optional(
            "protein_factor",
            FieldKind::Decimal {
                max_digits: 6,
                decimal_places: 2,
            },
            "Factor for calculating calories from protein.",
        ),
        FieldDescriptor::optional(
            "fat_factor",
            FieldKind::Decimal {
                max_digits: 6,
                decimal_places: 2,
            },
            "Factor for calculating calories from fat.",
        ),
        FieldDescriptor::optional(
            "cho_factor",
            FieldKind::Decimal {
                max_digits: 6,
                decimal_places: 2,
            },
            "Factor for calculating calories from carbohydrate.",
        ),
    ],
    list_display: &["ndb_no", "food_group_id", "short_desc"],
};

pub static WEIGHT: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Weight,
    name: "weight",
    table: "usda_nutrition_weight",
    fields: &[
        FieldDescriptor::key("id", FieldKind::AutoId, "Surrogate key."),
        FieldDescriptor::required(
            "food_description_id",
            FieldKind::ForeignKey {
                target: EntityKind::FoodDescription,
                max_length: 5,
            },
            NDB_NO_HELP,
        ),
        FieldDescriptor::required("sequence", FieldKind::SmallUnsigned, "Sequence number."),
        FieldDescriptor::required(
            "amount",
            FieldKind::Decimal {
                max_digits: 8,
                decimal_places: 3,
            },
            "Unit modifier (for example, 1 in \"1 cup\").",
        ),
        FieldDescriptor::required(
            "measure_description",
            FieldKind::Char { max_length: 84 },
            "Measure description (for example, cup, diced).",
        ),
        FieldDescriptor::required(
            "gram_weight",
            FieldKind::Decimal {
                max_digits: 8,
                decimal_places: 1,
            },
            "Gram weight.",
        ),
        FieldDescriptor::optional(
            "number_data_points",
            FieldKind::SmallUnsigned,
            "Number of data points.",
        ),
        FieldDescriptor::optional(
            "standard_deviation",
            FieldKind::Decimal {
                max_digits: 10,
                decimal_places: 3,
            },
            "Standard deviation.",
        ),
    ],
    list_display: &["food_description_id", "amount", "measure_description"],
};

pub static SOURCE_CODE: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::SourceCode,
    name: "source_code",
    table: "usda_nutrition_sourcecode",
    fields: &[
        FieldDescriptor::key(
            "source_code",
            FieldKind::Char { max_length: 2 },
            "2-digit code indicating type of data.",
        ),
        FieldDescriptor::required(
            "description",
            FieldKind::Char { max_length: 60 },
            "Type of nutrient data the code identifies.",
        ),
    ],
    list_display: &["source_code", "description"],
};

pub static NUTRIENT_DEFINITION: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::NutrientDefinition,
    name: "nutrient_definition",
    table: "usda_nutrition_nutrientdefinition",
    fields: &[
        FieldDescriptor::key(
            "nutrient_number",
            FieldKind::Char { max_length: 3 },
            "Unique 3-digit identifier code for a nutrient.",
        ),
        FieldDescriptor::required(
            "units",
            FieldKind::Char { max_length: 7 },
            "Units of measure (mg, g, µg, and so on).",
        ),
        FieldDescriptor::optional(
            "tagname",
            FieldKind::Char { max_length: 20 },
            "INFOODS tagname.",
        ),
        FieldDescriptor::required(
            "nutrient_description",
            FieldKind::Char { max_length: 60 },
            "Name of nutrient or food component.",
        ),
        FieldDescriptor::required(
            "num_decimal_places",
            FieldKind::Char { max_length: 1 },
            "Number of decimal places a nutrient value is rounded to.",
        ),
        FieldDescriptor::required(
            "sort_order",
            FieldKind::SmallUnsigned,
            "Report ordering of nutrient records.",
        ),
    ],
    list_display: &["nutrient_number", "tagname", "nutrient_description"],
};

pub static FOOTNOTE: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Footnote,
    name: "footnote",
    table: "usda_nutrition_footnote",
    fields: &[
        FieldDescriptor::key("id", FieldKind::AutoId, "Surrogate key."),
        FieldDescriptor::required(
            "food_description_id",
            FieldKind::ForeignKey {
                target: EntityKind::FoodDescription,
                max_length: 5,
            },
            NDB_NO_HELP,
        ),
        FieldDescriptor::required(
            "footnote_no",
            FieldKind::Char { max_length: 4 },
            "Sequence number. Shared by footnotes that apply to several nutrients.",
        ),
        FieldDescriptor::required(
            "footnote_type",
            FieldKind::Char { max_length: 1 },
            "Type of footnote.",
        )
        .with_choices(FOOTNOTE_TYPES),
        FieldDescriptor::optional(
            "nutrient_definition_id",
            FieldKind::ForeignKey {
                target: EntityKind::NutrientDefinition,
                max_length: 3,
            },
            "Nutrient to which the footnote applies.",
        ),
        FieldDescriptor::required(
            "footnote_text",
            FieldKind::Char { max_length: 200 },
            "Footnote text.",
        ),
    ],
    list_display: &["id", "footnote_no", "food_description_id", "footnote_type"],
};

static ENTITIES: [&EntityDescriptor; 7] = [
    &DERIVATION_CODE,
    &FOOD_GROUP,
    &FOOD_DESCRIPTION,
    &WEIGHT,
    &SOURCE_CODE,
    &NUTRIENT_DEFINITION,
    &FOOTNOTE,
];

/// All entity descriptors.
pub fn entities() -> &'static [&'static EntityDescriptor] {
    &ENTITIES
}

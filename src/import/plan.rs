//! Ordered job lists for an import run.
//!
//! An [`ImportPlan`] says which file feeds which table and in what column
//! order. Plans are validated against the schema descriptors before the run
//! opens a file or a transaction, so a typo in a field list fails at startup
//! rather than halfway through a load.

use crate::import::error::{ImportError, ImportResult};
use crate::schema::{EntityDescriptor, EntityKind, FieldDescriptor};
use serde::Serialize;
use std::collections::HashSet;

/// One source file mapped onto one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportJob {
    pub file_name: String,
    pub entity: EntityKind,
    /// Field names in the column order of the file.
    pub fields: Vec<String>,
}

impl ImportJob {
    pub fn new(file_name: impl Into<String>, entity: EntityKind, fields: &[&str]) -> Self {
        Self {
            file_name: file_name.into(),
            entity,
            fields: fields.iter().map(|field| field.to_string()).collect(),
        }
    }
}

/// A job whose field names have been resolved to descriptors.
#[derive(Debug, Clone)]
pub struct ResolvedJob {
    pub file_name: String,
    pub entity: &'static EntityDescriptor,
    pub fields: Vec<&'static FieldDescriptor>,
}

/// Ordered list of jobs executed inside a single transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportPlan {
    pub jobs: Vec<ImportJob>,
}

impl ImportPlan {
    pub fn new(jobs: Vec<ImportJob>) -> Self {
        Self { jobs }
    }

    /// The SR28 release files, parents before children.
    pub fn sr28() -> Self {
        Self::new(vec![
            ImportJob::new(
                "DERIV_CD.txt",
                EntityKind::DerivationCode,
                &["code", "description"],
            ),
            ImportJob::new("FD_GROUP.txt", EntityKind::FoodGroup, &["code", "description"]),
            ImportJob::new(
                "FOOD_DES.txt",
                EntityKind::FoodDescription,
                &[
                    "ndb_no",
                    "food_group_id",
                    "long_desc",
                    "short_desc",
                    "com_name",
                    "manufacturer_name",
                    "survey",
                    "refuse_description",
                    "refuse",
                    "scientific_name",
                    "nitrogen_factor",
                    "protein_factor",
                    "fat_factor",
                    "cho_factor",
                ],
            ),
            ImportJob::new(
                "WEIGHT.txt",
                EntityKind::Weight,
                &[
                    "food_description_id",
                    "sequence",
                    "amount",
                    "measure_description",
                    "gram_weight",
                    "number_data_points",
                    "standard_deviation",
                ],
            ),
            ImportJob::new(
                "SRC_CD.txt",
                EntityKind::SourceCode,
                &["source_code", "description"],
            ),
            ImportJob::new(
                "NUTR_DEF.txt",
                EntityKind::NutrientDefinition,
                &[
                    "nutrient_number",
                    "units",
                    "tagname",
                    "nutrient_description",
                    "num_decimal_places",
                    "sort_order",
                ],
            ),
            ImportJob::new(
                "FOOTNOTE.txt",
                EntityKind::Footnote,
                &[
                    "food_description_id",
                    "footnote_no",
                    "footnote_type",
                    "nutrient_definition_id",
                    "footnote_text",
                ],
            ),
        ])
    }

    /// Check the plan against the schema and resolve every field.
    ///
    /// Fails when a field is unknown, generated by the database, or listed
    /// twice for the same file, when the plan is empty, or when a job loads a
    /// table before a table it references.
    pub fn resolve(&self) -> ImportResult<Vec<ResolvedJob>> {
        if self.jobs.is_empty() {
            return Err(ImportError::Config("import plan has no jobs".to_string()));
        }

        let mut loaded: HashSet<EntityKind> = HashSet::new();
        let mut resolved = Vec::with_capacity(self.jobs.len());

        for job in &self.jobs {
            let entity = job.entity.descriptor();

            if job.fields.is_empty() {
                return Err(ImportError::Config(format!(
                    "{} maps no fields onto {}",
                    job.file_name, job.entity
                )));
            }

            let mut seen: HashSet<&'static str> = HashSet::new();
            let mut fields = Vec::with_capacity(job.fields.len());
            for name in &job.fields {
                let field = entity
                    .field(name)
                    .ok_or_else(|| ImportError::UnknownField {
                        entity: job.entity,
                        field: name.clone(),
                    })?;

                if !field.is_importable() {
                    return Err(ImportError::GeneratedField {
                        entity: job.entity,
                        field: field.name,
                    });
                }

                if !seen.insert(field.name) {
                    return Err(ImportError::DuplicateField {
                        entity: job.entity,
                        field: field.name,
                        file: job.file_name.clone(),
                    });
                }

                fields.push(field);
            }

            for target in entity.foreign_key_targets() {
                if target != job.entity && !loaded.contains(&target) {
                    return Err(ImportError::DependencyOrder {
                        file: job.file_name.clone(),
                        entity: job.entity,
                        target,
                    });
                }
            }

            loaded.insert(job.entity);
            resolved.push(ResolvedJob {
                file_name: job.file_name.clone(),
                entity,
                fields,
            });
        }

        Ok(resolved)
    }
}

impl Default for ImportPlan {
    fn default() -> Self {
        Self::sr28()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sr28_plan_resolves() {
        let jobs = ImportPlan::sr28().resolve().expect("sr28 plan is valid");
        assert_eq!(jobs.len(), 7);
        assert_eq!(jobs[0].file_name, "DERIV_CD.txt");
        assert_eq!(jobs[6].entity.kind, EntityKind::Footnote);
        assert_eq!(jobs[2].fields.len(), 14);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let plan = ImportPlan::new(vec![ImportJob::new(
            "FD_GROUP.txt",
            EntityKind::FoodGroup,
            &["code", "name"],
        )]);

        let err = plan.resolve().unwrap_err();
        assert!(matches!(err, ImportError::UnknownField { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_surrogate_id_is_rejected() {
        let plan = ImportPlan::new(vec![
            ImportJob::new("FD_GROUP.txt", EntityKind::FoodGroup, &["code", "description"]),
            ImportJob::new(
                "FOOD_DES.txt",
                EntityKind::FoodDescription,
                &["ndb_no", "food_group_id", "long_desc", "short_desc"],
            ),
            ImportJob::new("WEIGHT.txt", EntityKind::Weight, &["id", "food_description_id"]),
        ]);

        let err = plan.resolve().unwrap_err();
        assert!(matches!(err, ImportError::GeneratedField { field: "id", .. }));
    }

    #[test]
    fn test_duplicate_field_is_rejected() {
        let plan = ImportPlan::new(vec![ImportJob::new(
            "FD_GROUP.txt",
            EntityKind::FoodGroup,
            &["code", "code"],
        )]);

        assert!(matches!(
            plan.resolve().unwrap_err(),
            ImportError::DuplicateField { field: "code", .. }
        ));
    }

    #[test]
    fn test_child_before_parent_is_rejected() {
        let plan = ImportPlan::new(vec![
            ImportJob::new(
                "FOOD_DES.txt",
                EntityKind::FoodDescription,
                &["ndb_no", "food_group_id", "long_desc", "short_desc"],
            ),
            ImportJob::new("FD_GROUP.txt", EntityKind::FoodGroup, &["code", "description"]),
        ]);

        let err = plan.resolve().unwrap_err();
        assert!(matches!(
            err,
            ImportError::DependencyOrder {
                entity: EntityKind::FoodDescription,
                target: EntityKind::FoodGroup,
                ..
            }
        ));
    }

    #[test]
    fn test_footnote_needs_nutrients_loaded_first() {
        let mut plan = ImportPlan::sr28();
        let nutrients = plan.jobs.remove(5);
        assert_eq!(nutrients.entity, EntityKind::NutrientDefinition);
        plan.jobs.push(nutrients);

        assert!(matches!(
            plan.resolve().unwrap_err(),
            ImportError::DependencyOrder {
                entity: EntityKind::Footnote,
                target: EntityKind::NutrientDefinition,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_plan_is_a_configuration_error() {
        let err = ImportPlan::new(Vec::new()).resolve().unwrap_err();
        assert!(matches!(err, ImportError::Config(_)));
    }
}

//! Operation schema assembly.
//!
//! Each (model, operation) pair becomes one argument validator composed from
//! a fixed set of fragments. Assembly is stateless: the output depends only on
//! the model, the operation and the context.

use crate::context::GenerationContext;
use crate::diagnostic::CompilerError;
use crate::ir::{Model, OperationKind, SchemaIR};
use super::expr::{Expr, ObjectExpr, Primitive, Reference};
use super::naming::{operation_unit_name, UnitKind};
use super::unit::SchemaUnit;

/// Assembles the argument schema of `op` on `model_name`.
///
/// Fails when the model is not part of the metadata.
pub fn assemble_operation(
    model_name: &str,
    op: OperationKind,
    schema: &SchemaIR,
    ctx: &GenerationContext,
) -> Result<SchemaUnit, CompilerError> {
    let model = schema.model(model_name).ok_or_else(|| CompilerError::UnknownModel {
        model: model_name.to_string(),
        operation: op.method_name().to_string(),
    })?;

    let fragments = Fragments { model, ctx };
    let mut fields = Vec::new();

    if op.accepts_projection() {
        fields.extend(fragments.projection());
    }

    let m = &model.name;
    match op {
        OperationKind::FindUnique | OperationKind::DeleteOne => {
            fields.push(("where".into(), fragments.where_unique()));
        }
        OperationKind::FindFirst | OperationKind::FindMany => {
            fields.push(("where".into(), fragments.where_filter()));
            fields.push(("orderBy".into(), fragments.order_by(&fragments.relation_order_by())));
            fields.push(("cursor".into(), fragments.where_unique().optional()));
            fields.extend(fragments.pagination());
            fields.push(("distinct".into(), fragments.scalar_field_enum().array().optional()));
        }
        OperationKind::CreateOne => {
            fields.push((
                "data".into(),
                either(&format!("{m}CreateInput"), &format!("{m}UncheckedCreateInput")),
            ));
        }
        OperationKind::CreateMany => {
            let input = object(&format!("{m}CreateManyInput"));
            fields.push(("data".into(), Expr::Union(vec![input.clone(), input.array()])));
            if ctx.provider().supports_skip_duplicates() {
                fields.push(("skipDuplicates".into(), Expr::from(Primitive::Boolean).optional()));
            }
        }
        OperationKind::DeleteMany => {
            fields.push(("where".into(), fragments.where_filter()));
        }
        OperationKind::UpdateOne => {
            fields.push((
                "data".into(),
                either(&format!("{m}UpdateInput"), &format!("{m}UncheckedUpdateInput")),
            ));
            fields.push(("where".into(), fragments.where_unique()));
        }
        OperationKind::UpdateMany => {
            fields.push((
                "data".into(),
                either(&format!("{m}UpdateManyMutationInput"), &format!("{m}UncheckedUpdateManyInput")),
            ));
            fields.push(("where".into(), fragments.where_filter()));
        }
        OperationKind::UpsertOne => {
            fields.push(("where".into(), fragments.where_unique()));
            fields.push((
                "create".into(),
                either(&format!("{m}CreateInput"), &format!("{m}UncheckedCreateInput")),
            ));
            fields.push((
                "update".into(),
                either(&format!("{m}UpdateInput"), &format!("{m}UncheckedUpdateInput")),
            ));
        }
        OperationKind::Aggregate => {
            fields.push(("where".into(), fragments.where_filter()));
            fields.push(("orderBy".into(), fragments.order_by(&fragments.relation_order_by())));
            fields.push(("cursor".into(), fragments.where_unique().optional()));
            fields.extend(fragments.pagination());
            fields.extend(fragments.aggregates(schema));
        }
        OperationKind::GroupBy => {
            fields.push(("where".into(), fragments.where_filter()));
            fields.push((
                "orderBy".into(),
                fragments.order_by(&format!("{m}OrderByWithAggregationInput")),
            ));
            fields.push((
                "having".into(),
                object(&format!("{m}ScalarWhereWithAggregatesInput")).optional(),
            ));
            fields.extend(fragments.pagination());
            fields.push(("by".into(), fragments.scalar_field_enum().array()));
        }
    }

    Ok(SchemaUnit::schema(
        UnitKind::Operation,
        operation_unit_name(m, op),
        Expr::Object(ObjectExpr {
            fields,
            strict: false,
        }),
        None,
    ))
}

fn object(name: &str) -> Expr {
    Expr::reference(Reference::object(name))
}

/// Checked-or-unchecked input union.
fn either(checked: &str, unchecked: &str) -> Expr {
    Expr::Union(vec![object(checked), object(unchecked)])
}

/// Standard argument fragments of one model.
struct Fragments<'a> {
    model: &'a Model,
    ctx: &'a GenerationContext,
}

impl Fragments<'_> {
    fn name(&self) -> &str {
        &self.model.name
    }

    /// `select` and `include`, deferred so projection cycles stay legal.
    fn projection(&self) -> Vec<(String, Expr)> {
        let mut fields = Vec::new();
        if self.ctx.generate_select() {
            let select = object(&format!("{}Select", self.name()));
            fields.push(("select".into(), select.lazy().optional()));
        }
        if self.ctx.generate_include() && self.model.has_relations() {
            let include = object(&format!("{}Include", self.name()));
            fields.push(("include".into(), include.lazy().optional()));
        }
        fields
    }

    fn where_unique(&self) -> Expr {
        object(&format!("{}WhereUniqueInput", self.name()))
    }

    fn where_filter(&self) -> Expr {
        object(&format!("{}WhereInput", self.name())).optional()
    }

    fn relation_order_by(&self) -> String {
        if self.ctx.uses_relevance_ordering() {
            format!("{}OrderByWithRelationAndSearchRelevanceInput", self.name())
        } else {
            format!("{}OrderByWithRelationInput", self.name())
        }
    }

    /// A single order-by input or a list of them.
    fn order_by(&self, input: &str) -> Expr {
        let input = object(input);
        Expr::Union(vec![input.clone(), input.array()]).optional()
    }

    fn pagination(&self) -> Vec<(String, Expr)> {
        vec![
            ("take".into(), Expr::from(Primitive::Int).optional()),
            ("skip".into(), Expr::from(Primitive::Int).optional()),
        ]
    }

    fn scalar_field_enum(&self) -> Expr {
        Expr::reference(Reference::enumeration(format!("{}ScalarFieldEnum", self.name())))
    }

    fn aggregates(&self, schema: &SchemaIR) -> Vec<(String, Expr)> {
        let support = schema.aggregate_support(self.model);
        let m = self.name();
        let mut fields = Vec::new();

        if support.count {
            let count = Expr::Union(vec![
                Primitive::LiteralTrue.into(),
                object(&format!("{m}CountAggregateInput")),
            ]);
            fields.push(("_count".into(), count.optional()));
        }
        for (enabled, key, input) in [
            (support.min, "_min", "MinAggregateInput"),
            (support.max, "_max", "MaxAggregateInput"),
            (support.avg, "_avg", "AvgAggregateInput"),
            (support.sum, "_sum", "SumAggregateInput"),
        ] {
            if enabled {
                fields.push((key.into(), object(&format!("{m}{input}")).optional()));
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;
    use crate::context::FULL_TEXT_SEARCH;
    use crate::ir::{AggregateSupport, FieldKind, ModelField, ModelOperations, Provider};

    fn schema(provider: Provider) -> SchemaIR {
        SchemaIR {
            provider,
            models: vec![
                Model::new(
                    "User",
                    vec![
                        ModelField::new("id", FieldKind::Scalar, "Int"),
                        ModelField::new("posts", FieldKind::Object, "Post").list(),
                    ],
                ),
                Model::new("Tag", vec![ModelField::new("label", FieldKind::Scalar, "String")]),
            ],
            operations: vec![ModelOperations::all("User"), ModelOperations::all("Tag")],
            ..SchemaIR::default()
        }
    }

    fn assemble(schema: &SchemaIR, config: &CompilerConfig, model: &str, op: OperationKind) -> SchemaUnit {
        let ctx = GenerationContext::new(config, schema, &[]);
        assemble_operation(model, op, schema, &ctx).unwrap()
    }

    #[test]
    fn names_unit_after_model_and_verb() {
        let unit = assemble(&schema(Provider::Postgresql), &CompilerConfig::default(), "User", OperationKind::FindMany);
        assert_eq!(unit.name, "UserFindMany");
        assert_eq!(unit.symbol(), "UserFindManySchema");
        assert_eq!(unit.file_path(), "UserFindMany.schema.ts");
    }

    #[test]
    fn find_many_composes_standard_fragments() {
        let unit = assemble(&schema(Provider::Postgresql), &CompilerConfig::default(), "User", OperationKind::FindMany);
        assert_eq!(
            unit.field_names(),
            vec!["select", "include", "where", "orderBy", "cursor", "take", "skip", "distinct"]
        );
        assert_eq!(
            unit.field("where"),
            Some(&object("UserWhereInput").optional()),
            "top-level where binds eagerly"
        );
    }

    #[test]
    fn include_requires_relations() {
        let unit = assemble(&schema(Provider::Postgresql), &CompilerConfig::default(), "Tag", OperationKind::FindUnique);
        assert_eq!(unit.field_names(), vec!["select", "where"]);
    }

    #[test]
    fn toggles_disable_projection_fragments() {
        let config = CompilerConfig {
            generate_select: false,
            generate_include: false,
            ..CompilerConfig::default()
        };
        let unit = assemble(&schema(Provider::Postgresql), &config, "User", OperationKind::UpdateOne);
        assert_eq!(unit.field_names(), vec!["data", "where"]);
    }

    #[test]
    fn skip_duplicates_depends_on_provider() {
        for provider in [Provider::Postgresql, Provider::Mysql] {
            let unit = assemble(&schema(provider), &CompilerConfig::default(), "User", OperationKind::CreateMany);
            assert_eq!(
                unit.field("skipDuplicates"),
                Some(&Expr::from(Primitive::Boolean).optional())
            );
        }
        for provider in [Provider::Sqlite, Provider::Sqlserver, Provider::Mongodb, Provider::Unspecified] {
            let unit = assemble(&schema(provider), &CompilerConfig::default(), "User", OperationKind::CreateMany);
            assert_eq!(unit.field_names(), vec!["data"]);
        }
    }

    #[test]
    fn create_many_accepts_single_or_list() {
        let unit = assemble(&schema(Provider::Postgresql), &CompilerConfig::default(), "User", OperationKind::CreateMany);
        let input = object("UserCreateManyInput");
        assert_eq!(unit.field("data"), Some(&Expr::Union(vec![input.clone(), input.array()])));
    }

    #[test]
    fn relevance_ordering_needs_preview_feature() {
        let mut with_feature = schema(Provider::Mysql);
        with_feature.preview_features = vec![FULL_TEXT_SEARCH.to_string()];
        let unit = assemble(&with_feature, &CompilerConfig::default(), "User", OperationKind::FindFirst);
        let mut names = Vec::new();
        unit.field("orderBy").unwrap().visit_references(&mut |r| names.push(r.name.clone()));
        assert!(names.iter().all(|n| n == "UserOrderByWithRelationAndSearchRelevanceInput"));

        let unit = assemble(&schema(Provider::Mysql), &CompilerConfig::default(), "User", OperationKind::FindFirst);
        let mut names = Vec::new();
        unit.field("orderBy").unwrap().visit_references(&mut |r| names.push(r.name.clone()));
        assert!(names.iter().all(|n| n == "UserOrderByWithRelationInput"));
    }

    #[test]
    fn aggregate_fragments_follow_support_flags() {
        let mut schema = schema(Provider::Postgresql);
        schema.aggregate_support.insert(
            "User".into(),
            AggregateSupport {
                count: true,
                min: true,
                max: false,
                avg: false,
                sum: true,
            },
        );
        let unit = assemble(&schema, &CompilerConfig::default(), "User", OperationKind::Aggregate);
        assert_eq!(
            unit.field_names(),
            vec!["where", "orderBy", "cursor", "take", "skip", "_count", "_min", "_sum"]
        );
        assert_eq!(
            unit.field("_count"),
            Some(
                &Expr::Union(vec![Primitive::LiteralTrue.into(), object("UserCountAggregateInput")])
                    .optional()
            )
        );
    }

    #[test]
    fn group_by_requires_by() {
        let unit = assemble(&schema(Provider::Postgresql), &CompilerConfig::default(), "User", OperationKind::GroupBy);
        assert_eq!(
            unit.field_names(),
            vec!["where", "orderBy", "having", "take", "skip", "by"]
        );
        assert_eq!(
            unit.field("by"),
            Some(&Expr::reference(Reference::enumeration("UserScalarFieldEnum")).array())
        );
    }

    #[test]
    fn upsert_carries_create_and_update() {
        let unit = assemble(&schema(Provider::Postgresql), &CompilerConfig::default(), "User", OperationKind::UpsertOne);
        assert_eq!(
            unit.field_names(),
            vec!["select", "include", "where", "create", "update"]
        );
    }

    #[test]
    fn unknown_model_is_fatal() {
        let schema = schema(Provider::Postgresql);
        let ctx = GenerationContext::new(&CompilerConfig::default(), &schema, &[]);
        let err = assemble_operation("Ghost", OperationKind::FindMany, &schema, &ctx).unwrap_err();
        assert!(matches!(err, CompilerError::UnknownModel { ref model, .. } if model == "Ghost"));
    }
}

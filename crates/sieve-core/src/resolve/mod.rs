//! Top-level resolution passes.
//!
//! One call is one filter pass or one sort pass: normalize every source,
//! classify, merge, then resolve and build each surviving wrapper while
//! collecting every field error before deciding the outcome.


use crate::{
    build::{BucketRegistry, Materializer, PredicateBuilder, build_order},
    cast::CasterRegistry,
    config::{ConfigError, ResolverConfig},
    error::{ErrorSet, ResolveError},
    message::{DefaultMessages, MessageProvider},
    model::Schema,
    obs::{PassKind, ResolveEvent, sink},
    parse::{FilterEntry, QueryParams, RequestParser, SortEntry},
    path::{JoinGraph, PathResolver},
    policy::{CustomFilter, CustomSort, FilterContext, SortContext, merge_filters, merge_sorts},
    wrapper::{FilterWrapper, ResolvedKind, SortWrapper, SourceType},
};
use std::{fmt, sync::Arc};

///
/// FilterRequest
/// Already-decoded filter input from both sources.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct FilterRequest<'a> {
    pub query: Option<&'a QueryParams>,
    pub body: &'a [FilterEntry],
}

///
/// SortRequest
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SortRequest<'a> {
    pub query: Option<&'a QueryParams>,
    pub body: &'a [SortEntry],
}

///
/// Resolved
/// Materialized items plus the joins they reference.
///

#[derive(Debug)]
pub struct Resolved<T> {
    pub items: Vec<T>,
    pub joins: JoinGraph,
}

///
/// Resolver
///
/// Immutable after construction; one instance serves many concurrent
/// passes. Per-pass state (errors, joins) lives inside each call.
///

#[derive(Clone)]
pub struct Resolver {
    config: ResolverConfig,
    schema: Arc<dyn Schema>,
    messages: Arc<dyn MessageProvider>,
    casters: Arc<CasterRegistry>,
    buckets: Arc<BucketRegistry>,
}

impl Resolver {
    /// Build a resolver with the built-in registries and message catalog.
    pub fn new(config: ResolverConfig, schema: Arc<dyn Schema>) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            schema,
            messages: Arc::new(DefaultMessages),
            casters: CasterRegistry::shared(),
            buckets: BucketRegistry::shared(),
        })
    }

    #[must_use]
    pub fn with_messages(mut self, messages: Arc<dyn MessageProvider>) -> Self {
        self.messages = messages;
        self
    }

    #[must_use]
    pub fn with_casters(mut self, casters: Arc<CasterRegistry>) -> Self {
        self.casters = casters;
        self
    }

    #[must_use]
    pub fn with_buckets(mut self, buckets: Arc<BucketRegistry>) -> Self {
        self.buckets = buckets;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Run one filter pass.
    pub fn resolve_filters<M: Materializer>(
        &self,
        ctx: &FilterContext<M>,
        request: FilterRequest<'_>,
        materializer: &M,
    ) -> Result<Resolved<M::Predicate>, ResolveError> {
        let entity = ctx.entity();
        sink::record(&ResolveEvent::PassStart {
            pass: PassKind::Filter,
            entity,
        });

        let wrappers = self.filter_wrappers(request);
        let merged = merge_filters(wrappers.into_iter().filter_map(|w| ctx.classify(w)));

        let mut resolver = self.path_resolver(entity);
        let mut errors = self.error_set();
        let builder = PredicateBuilder::new(materializer, &self.casters, &self.buckets);
        let mut items = Vec::with_capacity(merged.len());

        for wrapper in &merged {
            let built = match wrapper.resolved_kind {
                Some(ResolvedKind::Custom) => {
                    self.custom_filter(ctx, wrapper, &mut resolver, materializer, &mut errors)
                }
                Some(ResolvedKind::Normal) | None => {
                    Self::normal_filter(ctx, wrapper, &mut resolver, &builder, &mut errors)
                }
            };
            items.extend(built);
        }

        Self::finish(PassKind::Filter, entity, items, resolver, errors)
    }

    /// Run one sort pass.
    pub fn resolve_sorts<M: Materializer>(
        &self,
        ctx: &SortContext<M>,
        request: SortRequest<'_>,
        materializer: &M,
    ) -> Result<Resolved<M::Order>, ResolveError> {
        let entity = ctx.entity();
        sink::record(&ResolveEvent::PassStart {
            pass: PassKind::Sort,
            entity,
        });

        let wrappers = self.sort_wrappers(request);
        let merged = merge_sorts(wrappers.into_iter().filter_map(|w| ctx.classify(w)));

        let mut resolver = self.path_resolver(entity);
        let mut errors = self.error_set();
        let mut items = Vec::with_capacity(merged.len());

        for wrapper in &merged {
            let built = match wrapper.resolved_kind {
                Some(ResolvedKind::Custom) => {
                    let Some(policy) = ctx.custom_policy(&wrapper.original_field_name) else {
                        continue;
                    };

                    (policy.function)(CustomSort {
                        wrapper,
                        resolver: &mut resolver,
                        materializer,
                        errors: &mut errors,
                    })
                }
                Some(ResolvedKind::Normal) | None => {
                    let Some(policy) = ctx.field_policy(&wrapper.field) else {
                        continue;
                    };

                    match policy.target.resolve(&wrapper.field, &mut resolver) {
                        Ok(field) => Some(build_order(materializer, &field, wrapper.direction)),
                        Err(err) => {
                            errors.path_failed(&wrapper.original_field_name, &err, &[]);
                            None
                        }
                    }
                }
            };
            items.extend(built);
        }

        Self::finish(PassKind::Sort, entity, items, resolver, errors)
    }

    // Sources are always read query-first, body-second.
    fn filter_wrappers(&self, request: FilterRequest<'_>) -> Vec<FilterWrapper> {
        let parser = RequestParser::new(&self.config);
        let mut wrappers = Vec::new();

        for source in SourceType::PROCESSING_ORDER {
            match source {
                SourceType::QueryParam => {
                    if let Some(query) = request.query {
                        wrappers.extend(parser.query_filters(query));
                    }
                }
                SourceType::RequestBody => wrappers.extend(parser.body_filters(request.body)),
            }
        }

        wrappers
    }

    fn sort_wrappers(&self, request: SortRequest<'_>) -> Vec<SortWrapper> {
        let parser = RequestParser::new(&self.config);
        let mut wrappers = Vec::new();

        for source in SourceType::PROCESSING_ORDER {
            match source {
                SourceType::QueryParam => {
                    if let Some(query) = request.query {
                        wrappers.extend(parser.query_sorts(query));
                    }
                }
                SourceType::RequestBody => wrappers.extend(parser.body_sorts(request.body)),
            }
        }

        wrappers
    }

    fn normal_filter<M: Materializer>(
        ctx: &FilterContext<M>,
        wrapper: &FilterWrapper,
        resolver: &mut PathResolver,
        builder: &PredicateBuilder<'_, M>,
        errors: &mut ErrorSet,
    ) -> Option<M::Predicate> {
        let policy = ctx.field_policy(&wrapper.field)?;

        match policy.target.resolve(&wrapper.field, resolver) {
            Ok(field) => builder.build(wrapper, &field, errors),
            Err(err) => {
                errors.path_failed(&wrapper.original_field_name, &err, &wrapper.values);
                None
            }
        }
    }

    fn custom_filter<M: Materializer>(
        &self,
        ctx: &FilterContext<M>,
        wrapper: &FilterWrapper,
        resolver: &mut PathResolver,
        materializer: &M,
        errors: &mut ErrorSet,
    ) -> Option<M::Predicate> {
        let policy = ctx.custom_policy(&wrapper.original_field_name)?;
        let op = wrapper.operator;

        if !op.supports(&policy.data_type) {
            errors.unsupported_operator(
                &wrapper.original_field_name,
                op,
                &policy.data_type,
                &wrapper.values,
            );
            return None;
        }

        let operands = self.casters.safe_cast_all(
            &op.operand_kind(&policy.data_type),
            &wrapper.values,
            &wrapper.original_field_name,
            errors,
        );

        (policy.function)(CustomFilter {
            wrapper,
            operands,
            resolver,
            materializer,
            errors,
        })
    }

    fn path_resolver(&self, entity: &str) -> PathResolver {
        PathResolver::new(
            Arc::clone(&self.schema),
            entity,
            self.config.path_separator.as_str(),
        )
    }

    fn error_set(&self) -> ErrorSet {
        ErrorSet::new(self.config.object_name.as_str(), Arc::clone(&self.messages))
    }

    fn finish<T>(
        pass: PassKind,
        entity: &str,
        items: Vec<T>,
        resolver: PathResolver,
        errors: ErrorSet,
    ) -> Result<Resolved<T>, ResolveError> {
        sink::record(&ResolveEvent::PassFinish {
            pass,
            entity,
            resolved: items.len(),
            rejected: errors.len(),
        });

        errors.into_result()?;

        Ok(Resolved {
            items,
            joins: resolver.into_graph(),
        })
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .field("casters", &self.casters)
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}

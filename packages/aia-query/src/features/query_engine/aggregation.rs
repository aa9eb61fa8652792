// Aggregation - reductions and group-by over selections
//
// Provides:
// - count, min, max, avg, median over one attribute
// - count_by and min_by / max_by / avg_by with single or tuple group keys
// - AggregationBuilder: several aggregations in one pass description
//
// min/max/avg/median of nothing is EmptyAggregation; avg and median only
// accept numbers. Reductions resolve the attribute on every element, so an
// element without it is UnsupportedAttribute. Group order is first-seen order.

use super::context::QueryContext;
use super::domain::{AttrHandle, Attribute, Value};
use super::selection::Selection;
use crate::config::UnresolvedGroups;
use crate::errors::{QueryError, Result};
use crate::features::entity_model::EntityRef;
use indexmap::IndexMap;
use std::cmp::Ordering;
use tracing::debug;

// ============================================================================
// Group keys and grouped results
// ============================================================================

/// Attributes an aggregation groups by; more than one makes a tuple key
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBy {
    attributes: Vec<Attribute>,
}

impl GroupBy {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

impl From<Attribute> for GroupBy {
    fn from(attribute: Attribute) -> Self {
        Self::new(vec![attribute])
    }
}

impl From<AttrHandle> for GroupBy {
    fn from(handle: AttrHandle) -> Self {
        Self::new(vec![handle.into()])
    }
}

impl From<(AttrHandle, AttrHandle)> for GroupBy {
    fn from((a, b): (AttrHandle, AttrHandle)) -> Self {
        Self::new(vec![a.into(), b.into()])
    }
}

impl From<(AttrHandle, AttrHandle, AttrHandle)> for GroupBy {
    fn from((a, b, c): (AttrHandle, AttrHandle, AttrHandle)) -> Self {
        Self::new(vec![a.into(), b.into(), c.into()])
    }
}

impl From<Vec<AttrHandle>> for GroupBy {
    fn from(handles: Vec<AttrHandle>) -> Self {
        Self::new(handles.into_iter().map(Attribute::from).collect())
    }
}

/// Immutable, first-seen ordered mapping from group key to result
#[derive(Debug, Clone, PartialEq)]
pub struct Grouped<T> {
    groups: IndexMap<Value, T>,
}

pub type GroupCounts = Grouped<usize>;

impl<T> Grouped<T> {
    pub(crate) fn from_map(groups: IndexMap<Value, T>) -> Self {
        Self { groups }
    }

    /// Lookup with filter equality, so `get("Button")` finds a type key.
    pub fn get(&self, key: impl Into<Value>) -> Option<&T> {
        let key = key.into();
        self.groups.get(&key).or_else(|| {
            self.groups
                .iter()
                .find(|(k, _)| k.loose_eq(&key))
                .map(|(_, v)| v)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &T)> {
        self.groups.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.groups.keys()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// New mapping with the groups satisfying `keep`; order is preserved.
    pub fn filter(&self, keep: impl Fn(&Value, &T) -> bool) -> Self
    where
        T: Clone,
    {
        Self::from_map(
            self.groups
                .iter()
                .filter(|(k, v)| keep(k, v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    pub fn into_map(self) -> IndexMap<Value, T> {
        self.groups
    }
}

impl Grouped<usize> {
    pub fn total(&self) -> usize {
        self.groups.values().sum()
    }
}

impl<'a, T> IntoIterator for &'a Grouped<T> {
    type Item = (&'a Value, &'a T);
    type IntoIter = indexmap::map::Iter<'a, Value, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

// ============================================================================
// Reductions
// ============================================================================

/// Attribute values of `entities`, one per entity. An entity without the
/// attribute fails the whole reduction with UnsupportedAttribute.
pub(crate) fn collect_values<'p, I>(ctx: &QueryContext<'p>, entities: I, attribute: &Attribute) -> Result<Vec<Value>>
where
    I: IntoIterator<Item = Result<EntityRef<'p>>>,
{
    entities
        .into_iter()
        .map(|entity| ctx.resolve(entity?, attribute.clone()))
        .collect()
}

/// Attribute values of `entities`, skipping entities that lack the
/// attribute (unless the context is strict).
pub(crate) fn project_values<'p, I>(ctx: &QueryContext<'p>, entities: I, attribute: &Attribute) -> Result<Vec<Value>>
where
    I: IntoIterator<Item = Result<EntityRef<'p>>>,
{
    let mut values = Vec::new();
    for entity in entities {
        if let Some(value) = ctx.resolve_lenient(entity?, attribute)? {
            values.push(value);
        }
    }
    Ok(values)
}

fn extreme(values: Vec<Value>, what: &'static str, wanted: Ordering) -> Result<Value> {
    let mut iter = values.into_iter();
    let mut best = iter.next().ok_or(QueryError::EmptyAggregation(what))?;
    for value in iter {
        if value.try_cmp(&best)? == wanted {
            best = value;
        }
    }
    Ok(best)
}

/// Smallest value; the first one wins ties.
pub fn min_value(values: Vec<Value>) -> Result<Value> {
    extreme(values, "min", Ordering::Less)
}

/// Largest value; the first one wins ties.
pub fn max_value(values: Vec<Value>) -> Result<Value> {
    extreme(values, "max", Ordering::Greater)
}

fn numbers(values: &[Value], what: &'static str) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(QueryError::EmptyAggregation(what));
    }
    values
        .iter()
        .map(|v| {
            v.as_f64().ok_or_else(|| {
                QueryError::type_mismatch(format!("{what} needs numbers, got {}", v.kind_name()))
            })
        })
        .collect()
}

pub fn mean(values: &[Value]) -> Result<f64> {
    let numbers = numbers(values, "avg")?;
    Ok(numbers.iter().sum::<f64>() / numbers.len() as f64)
}

/// Middle value; the mean of the two middle values for even counts.
pub fn median(values: &[Value]) -> Result<f64> {
    let mut numbers = numbers(values, "median")?;
    numbers.sort_by(f64::total_cmp);
    let mid = numbers.len() / 2;
    if numbers.len() % 2 == 1 {
        Ok(numbers[mid])
    } else {
        Ok((numbers[mid - 1] + numbers[mid]) / 2.0)
    }
}

// ============================================================================
// Group-by
// ============================================================================

/// Group key of one entity; `None` when the entity is dropped.
fn group_key<'p>(ctx: &QueryContext<'p>, entity: EntityRef<'p>, group: &GroupBy) -> Result<Option<Value>> {
    let mut parts = Vec::with_capacity(group.attributes().len());
    for attribute in group.attributes() {
        match ctx.resolve(entity, attribute.clone()) {
            Ok(value) => parts.push(value),
            Err(err) if err.is_unsupported_attribute() => match ctx.config().unresolved_groups {
                UnresolvedGroups::Collect => parts.push(Value::Null),
                UnresolvedGroups::Skip => return Ok(None),
            },
            Err(err) => return Err(err),
        }
    }
    Ok(Some(match <[Value; 1]>::try_from(parts) {
        Ok([single]) => single,
        Err(parts) => Value::List(parts),
    }))
}

pub(crate) fn count_by<'p, I>(ctx: &QueryContext<'p>, entities: I, group: &GroupBy) -> Result<GroupCounts>
where
    I: IntoIterator<Item = Result<EntityRef<'p>>>,
{
    let mut counts: IndexMap<Value, usize> = IndexMap::new();
    for entity in entities {
        if let Some(key) = group_key(ctx, entity?, group)? {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    debug!(groups = counts.len(), "count_by");
    Ok(Grouped::from_map(counts))
}

/// Values of `attribute` bucketed by group key.
fn bucket_values<'p, I>(
    ctx: &QueryContext<'p>,
    entities: I,
    attribute: &Attribute,
    group: &GroupBy,
) -> Result<IndexMap<Value, Vec<Value>>>
where
    I: IntoIterator<Item = Result<EntityRef<'p>>>,
{
    let mut buckets: IndexMap<Value, Vec<Value>> = IndexMap::new();
    for entity in entities {
        let entity = entity?;
        let Some(key) = group_key(ctx, entity, group)? else {
            continue;
        };
        let value = ctx.resolve(entity, attribute.clone())?;
        buckets.entry(key).or_default().push(value);
    }
    Ok(buckets)
}

pub(crate) fn reduce_by<'p, I, T>(
    ctx: &QueryContext<'p>,
    entities: I,
    attribute: &Attribute,
    group: &GroupBy,
    reduce: impl Fn(Vec<Value>) -> Result<T>,
) -> Result<Grouped<T>>
where
    I: IntoIterator<Item = Result<EntityRef<'p>>>,
{
    let buckets = bucket_values(ctx, entities, attribute, group)?;
    let mut out = IndexMap::with_capacity(buckets.len());
    for (key, values) in buckets {
        out.insert(key, reduce(values)?);
    }
    debug!(attribute = %attribute, groups = out.len(), "grouped reduction");
    Ok(Grouped::from_map(out))
}

// ============================================================================
// AggregationBuilder
// ============================================================================

/// Aggregation result
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregationResult {
    pub count: Option<usize>,
    pub avg: IndexMap<String, f64>,
    pub median: IndexMap<String, f64>,
    pub min: IndexMap<String, Value>,
    pub max: IndexMap<String, Value>,
}

/// AggregationBuilder - several aggregations over one selection
///
/// Example:
/// ```ignore
/// let stats = ctx
///     .blocks()
///     .select(A::top_level().eq(true))
///     .aggregate()
///     .count()
///     .avg(A::depth())
///     .max(A::depth())
///     .execute()?;
///
/// println!("handlers: {}", stats.count.unwrap_or(0));
/// ```
pub struct AggregationBuilder<'c, 'p> {
    selection: Selection<'c, 'p>,

    // Requested aggregations
    do_count: bool,
    avg_fields: Vec<Attribute>,
    median_fields: Vec<Attribute>,
    min_fields: Vec<Attribute>,
    max_fields: Vec<Attribute>,
}

impl<'c, 'p> AggregationBuilder<'c, 'p> {
    pub fn new(selection: Selection<'c, 'p>) -> Self {
        Self {
            selection,
            do_count: false,
            avg_fields: Vec::new(),
            median_fields: Vec::new(),
            min_fields: Vec::new(),
            max_fields: Vec::new(),
        }
    }

    pub fn count(mut self) -> Self {
        self.do_count = true;
        self
    }

    pub fn avg(mut self, attribute: impl Into<Attribute>) -> Self {
        self.avg_fields.push(attribute.into());
        self
    }

    pub fn median(mut self, attribute: impl Into<Attribute>) -> Self {
        self.median_fields.push(attribute.into());
        self
    }

    pub fn min(mut self, attribute: impl Into<Attribute>) -> Self {
        self.min_fields.push(attribute.into());
        self
    }

    pub fn max(mut self, attribute: impl Into<Attribute>) -> Self {
        self.max_fields.push(attribute.into());
        self
    }

    /// Materialize the selection once and compute every requested metric.
    pub fn execute(self) -> Result<AggregationResult> {
        let entities = self.selection.to_vec()?;
        let ctx = self.selection.context();
        let values = |attribute: &Attribute| {
            collect_values(ctx, entities.iter().copied().map(Ok), attribute)
        };

        let mut result = AggregationResult::default();
        if self.do_count {
            result.count = Some(entities.len());
        }
        for attribute in &self.avg_fields {
            result.avg.insert(attribute.to_string(), mean(&values(attribute)?)?);
        }
        for attribute in &self.median_fields {
            result.median.insert(attribute.to_string(), median(&values(attribute)?)?);
        }
        for attribute in &self.min_fields {
            result.min.insert(attribute.to_string(), min_value(values(attribute)?)?);
        }
        for attribute in &self.max_fields {
            result.max.insert(attribute.to_string(), max_value(values(attribute)?)?);
        }

        debug!(entities = entities.len(), "aggregation executed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Int).collect()
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&ints(&[1, 2, 3, 4])).unwrap(), 2.5);
        assert_eq!(median(&ints(&[1, 2, 3])).unwrap(), 2.0);
        assert_eq!(median(&ints(&[4, 1, 3])).unwrap(), 3.0);
        assert_eq!(median(&[Value::Float(1.5), Value::Int(2)]).unwrap(), 1.75);
    }

    #[test]
    fn test_mean_requires_numbers() {
        assert_eq!(mean(&ints(&[1, 2, 3, 6])).unwrap(), 3.0);
        assert!(matches!(
            mean(&[Value::Int(1), Value::from("2")]),
            Err(QueryError::TypeMismatch(_))
        ));
        assert!(matches!(median(&[Value::Bool(true)]), Err(QueryError::TypeMismatch(_))));
    }

    #[test]
    fn test_empty_aggregations() {
        assert_eq!(mean(&[]), Err(QueryError::EmptyAggregation("avg")));
        assert_eq!(median(&[]), Err(QueryError::EmptyAggregation("median")));
        assert_eq!(min_value(vec![]), Err(QueryError::EmptyAggregation("min")));
        assert_eq!(max_value(vec![]), Err(QueryError::EmptyAggregation("max")));
    }

    #[test]
    fn test_extremes() {
        assert_eq!(min_value(ints(&[3, 1, 2])).unwrap(), Value::Int(1));
        assert_eq!(max_value(vec![Value::Int(3), Value::Float(3.5)]).unwrap(), Value::Float(3.5));
        assert_eq!(
            max_value(vec![Value::from("Button1"), Value::from("Label1")]).unwrap(),
            Value::from("Label1")
        );
        assert!(min_value(vec![Value::Int(1), Value::from("a")]).is_err());
    }

    #[test]
    fn test_grouped_filter_is_pure() {
        let mut map = IndexMap::new();
        map.insert(Value::from("Click"), 2usize);
        map.insert(Value::from("LongClick"), 1usize);
        map.insert(Value::Null, 3usize);
        let counts = GroupCounts::from_map(map);

        let frequent = counts.filter(|_, n| *n >= 2);
        assert_eq!(frequent.len(), 2);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.total(), 6);
        let keys: Vec<_> = frequent.keys().cloned().collect();
        assert_eq!(keys, vec![Value::from("Click"), Value::Null]);
        assert_eq!(counts.get("LongClick"), Some(&1));
        assert_eq!(counts.get("Other"), None);
    }
}

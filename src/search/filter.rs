//! Exact Filter Pipeline
//!
//! Filters, sorts and paginates a full in-memory course list. Pure: the same
//! input always yields the same output, and nothing is mutated.
//!
//! ## Missing fields
//! Records are allowed to lack any optional field. One policy applies
//! everywhere:
//! - an **active predicate** that needs a missing field rejects the record
//!   (a course with no price never matches `minPrice`, a course with no
//!   category never matches `category`, and so on);
//! - a **comparator** places records with a missing sort key after every
//!   record that has one, in ascending and descending order alike. This
//!   matches the `missing: _last` sort sent to the engine on the fuzzy path.

use super::types::{SearchParams, SearchResult, SortKey};
use crate::catalog::types::Course;

use std::cmp::Ordering;

/// Runs the whole pipeline: predicates, sort, page.
pub fn filter_courses(courses: &[Course], params: &SearchParams) -> SearchResult {
    let mut matched: Vec<&Course> = courses.iter().filter(|c| matches(c, params)).collect();
    matched.sort_by(|a, b| compare(a, b, params.sort));

    let total = matched.len();
    let courses = paginate(&matched, params.page, params.size)
        .iter()
        .map(|c| (*c).clone())
        .collect();

    SearchResult { total, courses }
}

/// True when `course` satisfies every active filter in `params`.
pub fn matches(course: &Course, params: &SearchParams) -> bool {
    if let Some(keyword) = params.keyword() {
        let needle = keyword.to_lowercase();
        let hit = contains_ci(course.title.as_deref(), &needle)
            || contains_ci(course.description.as_deref(), &needle);
        if !hit {
            return false;
        }
    }

    at_least(course.min_age, params.min_age)
        && at_most(course.max_age, params.max_age)
        && equals_ci(course.category.as_deref(), params.category())
        && equals_ci(course.course_type.as_deref(), params.course_type())
        && at_least(course.price, params.min_price)
        && at_most(course.price, params.max_price)
        && at_least(course.next_session_date, params.start_date)
}

/// `value >= bound`. No bound: passes. Bound but no value: fails.
fn at_least<T: PartialOrd>(value: Option<T>, bound: Option<T>) -> bool {
    match (value, bound) {
        (_, None) => true,
        (Some(v), Some(b)) => v >= b,
        (None, Some(_)) => false,
    }
}

/// `value <= bound`. No bound: passes. Bound but no value: fails.
fn at_most<T: PartialOrd>(value: Option<T>, bound: Option<T>) -> bool {
    match (value, bound) {
        (_, None) => true,
        (Some(v), Some(b)) => v <= b,
        (None, Some(_)) => false,
    }
}

fn equals_ci(value: Option<&str>, expected: Option<&str>) -> bool {
    match (value, expected) {
        (_, None) => true,
        (Some(v), Some(e)) => v.to_lowercase() == e.to_lowercase(),
        (None, Some(_)) => false,
    }
}

/// `needle` must already be lowercase.
fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

/// Ordering for `sort`, with missing keys last in both directions.
pub fn compare(a: &Course, b: &Course, sort: SortKey) -> Ordering {
    match sort {
        SortKey::PriceAsc => nulls_last(a.price, b.price, |x, y| x.total_cmp(y)),
        SortKey::PriceDesc => nulls_last(a.price, b.price, |x, y| y.total_cmp(x)),
        SortKey::NextSessionDate => {
            nulls_last(a.next_session_date, b.next_session_date, |x, y| x.cmp(y))
        }
    }
}

fn nulls_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(&x, &y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Slice `[page*size, min(page*size + size, len))`, or empty past the end.
pub fn paginate<T>(items: &[T], page: usize, size: usize) -> &[T] {
    let from = page.saturating_mul(size);
    if from >= items.len() {
        return &[];
    }
    let to = from.saturating_add(size).min(items.len());
    &items[from..to]
}

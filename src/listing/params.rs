//! Query-string parsing for the listing page. Nothing here fails: bad input falls back to defaults.

use crate::sql::{Condition, Match, SortDirection};

/// A filterable field: query-string key, backing column, comparison.
#[derive(Debug)]
pub struct FilterField {
    pub param: &'static str,
    pub column: &'static str,
    pub label: &'static str,
    pub op: Match,
}

#[derive(Debug)]
pub struct SortableColumn {
    pub column: &'static str,
    pub label: &'static str,
}

/// Static description of a listable table.
#[derive(Debug)]
pub struct TableSpec {
    pub table: &'static str,
    /// SELECT list, in row-mapper order.
    pub columns: &'static [&'static str],
    /// Sort whitelist; the first entry is the default (primary key).
    pub sortable: &'static [SortableColumn],
    pub filters: &'static [FilterField],
}

impl TableSpec {
    pub fn default_sort(&self) -> &'static str {
        self.sortable.first().map_or("id", |c| c.column)
    }

    /// Returns the whitelisted column equal to `name`, if any.
    pub fn sort_column(&self, name: &str) -> Option<&'static str> {
        self.sortable.iter().find(|c| c.column == name).map(|c| c.column)
    }
}

/// Raw filter values, one per field of the table; `""` means not applied.
#[derive(Clone, Debug)]
pub struct Filters {
    values: Vec<(&'static FilterField, String)>,
}

impl Filters {
    pub fn get(&self, param: &str) -> &str {
        self.values
            .iter()
            .find(|(f, _)| f.param == param)
            .map_or("", |(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static FilterField, &str)> + '_ {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Applied filters in field order. The builder binds parameters in this same order.
    pub fn conditions(&self) -> Vec<Condition<'_>> {
        self.iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(f, v)| Condition {
                column: f.column,
                op: f.op,
                value: v,
            })
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct ListingParams {
    /// Requested page, 1-based, not yet clamped.
    pub page: u64,
    pub sort: &'static str,
    pub dir: SortDirection,
    pub filters: Filters,
    /// `?k=v&...&` (or `?`) reproducing every inbound parameter except `page`.
    pub base_query_prefix: String,
}

impl ListingParams {
    pub fn parse(spec: &'static TableSpec, query: &[(String, String)]) -> Self {
        let page = first(query, "page")
            .parse::<u64>()
            .ok()
            .filter(|&p| p > 0)
            .unwrap_or(1);
        let sort = spec
            .sort_column(first(query, "sort"))
            .unwrap_or_else(|| spec.default_sort());
        let dir = SortDirection::parse(first(query, "dir")).unwrap_or_default();
        let filters = Filters {
            values: spec
                .filters
                .iter()
                .map(|f| (f, first(query, f.param).to_string()))
                .collect(),
        };
        ListingParams {
            page,
            sort,
            dir,
            filters,
            base_query_prefix: base_query_prefix(query),
        }
    }
}

/// Decodes a raw query string; undecodable input yields no parameters.
pub fn query_pairs(raw: Option<&str>) -> Vec<(String, String)> {
    serde_urlencoded::from_str(raw.unwrap_or_default()).unwrap_or_default()
}

/// First value for `key`, or `""`.
fn first<'a>(query: &'a [(String, String)], key: &str) -> &'a str {
    query
        .iter()
        .find(|(k, _)| k == key)
        .map_or("", |(_, v)| v.as_str())
}

/// Keys sorted, values in arrival order, `page` dropped.
fn base_query_prefix(query: &[(String, String)]) -> String {
    let mut kept: Vec<&(String, String)> = query.iter().filter(|(k, _)| k != "page").collect();
    kept.sort_by(|a, b| a.0.cmp(&b.0));
    let encoded = serde_urlencoded::to_string(&kept).unwrap_or_default();
    if encoded.is_empty() {
        "?".to_string()
    } else {
        format!("?{}&", encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::TAX_RATES;

    fn q(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_on_empty_query() {
        let p = ListingParams::parse(&TAX_RATES, &[]);
        assert_eq!(p.page, 1);
        assert_eq!(p.sort, "id");
        assert_eq!(p.dir, SortDirection::Asc);
        assert!(p.filters.conditions().is_empty());
        assert_eq!(p.base_query_prefix, "?");
    }

    #[test]
    fn bad_page_values_fall_back_to_one() {
        for bad in ["0", "-3", "abc", "", "1.5"] {
            let p = ListingParams::parse(&TAX_RATES, &q(&[("page", bad)]));
            assert_eq!(p.page, 1, "page={bad}");
        }
        assert_eq!(ListingParams::parse(&TAX_RATES, &q(&[("page", "4")])).page, 4);
    }

    #[test]
    fn unknown_sort_resets_to_primary_key() {
        for bad in ["name", "id; DROP TABLE x", "ID", "rate_percent desc"] {
            let p = ListingParams::parse(&TAX_RATES, &q(&[("sort", bad)]));
            assert_eq!(p.sort, "id", "sort={bad}");
        }
        let p = ListingParams::parse(&TAX_RATES, &q(&[("sort", "end_date")]));
        assert_eq!(p.sort, "end_date");
    }

    #[test]
    fn unknown_dir_resets_to_asc() {
        for bad in ["ASC", "descending", "", "desc "] {
            let p = ListingParams::parse(&TAX_RATES, &q(&[("dir", bad)]));
            assert_eq!(p.dir, SortDirection::Asc, "dir={bad}");
        }
        let p = ListingParams::parse(&TAX_RATES, &q(&[("dir", "desc")]));
        assert_eq!(p.dir, SortDirection::Desc);
    }

    #[test]
    fn filters_are_copied_verbatim_in_field_order() {
        let p = ListingParams::parse(
            &TAX_RATES,
            &q(&[("rate_percent", " 20 "), ("start_date", "2024-%"), ("id", "x")]),
        );
        assert_eq!(p.filters.get("rate_percent"), " 20 ");
        assert_eq!(p.filters.get("end_date"), "");
        let cols: Vec<_> = p.filters.conditions().iter().map(|c| c.column).collect();
        assert_eq!(cols, ["id", "start_date", "rate_percent"]);
    }

    #[test]
    fn first_value_wins() {
        let p = ListingParams::parse(&TAX_RATES, &q(&[("id", "1"), ("id", "2")]));
        assert_eq!(p.filters.get("id"), "1");
    }

    #[test]
    fn prefix_drops_page_and_keeps_everything_else() {
        let p = ListingParams::parse(
            &TAX_RATES,
            &q(&[("page", "3"), ("sort", "start_date"), ("dir", "desc"), ("start_date", "2024 01"), ("x", "y")]),
        );
        assert_eq!(p.base_query_prefix, "?dir=desc&sort=start_date&start_date=2024+01&x=y&");
        assert!(!p.base_query_prefix.contains("page="));
    }

    #[test]
    fn prefix_without_other_params() {
        let p = ListingParams::parse(&TAX_RATES, &q(&[("page", "2")]));
        assert_eq!(p.base_query_prefix, "?");
    }

    #[test]
    fn query_pairs_decodes_or_gives_up() {
        assert!(query_pairs(None).is_empty());
        assert_eq!(
            query_pairs(Some("sort=id&end_date=2024%2D01")),
            q(&[("sort", "id"), ("end_date", "2024-01")])
        );
    }
}

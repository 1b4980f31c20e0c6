/// A selectable region and its international dial code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub code: &'static str,
}

/// Regions in the order the selector shows them.
pub const REGIONS: &[Region] = &[
    Region { name: "India", code: "+91" },
    Region { name: "United States", code: "+1" },
    Region { name: "United Kingdom", code: "+44" },
    Region { name: "Canada", code: "+1" },
    Region { name: "Australia", code: "+61" },
    Region { name: "Germany", code: "+49" },
    Region { name: "France", code: "+33" },
    Region { name: "Italy", code: "+39" },
    Region { name: "Spain", code: "+34" },
    Region { name: "Netherlands", code: "+31" },
    Region { name: "Switzerland", code: "+41" },
    Region { name: "Sweden", code: "+46" },
    Region { name: "Japan", code: "+81" },
    Region { name: "China", code: "+86" },
    Region { name: "South Korea", code: "+82" },
    Region { name: "Singapore", code: "+65" },
    Region { name: "United Arab Emirates", code: "+971" },
    Region { name: "Brazil", code: "+55" },
    Region { name: "Mexico", code: "+52" },
    Region { name: "South Africa", code: "+27" },
];

/// Dial code for an exact region name.
pub fn region_code(name: &str) -> Option<&'static str> {
    find_region(name).map(|r| r.code)
}

pub fn find_region(name: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.name == name)
}

/// Lookup for typed input (CLI), where casing is not guaranteed.
pub fn find_region_ignore_case(name: &str) -> Option<&'static Region> {
    let name = name.trim();
    REGIONS.iter().find(|r| r.name.eq_ignore_ascii_case(name))
}

pub fn region_names() -> impl Iterator<Item = &'static str> {
    REGIONS.iter().map(|r| r.name)
}

/// Position of a region in the table, used by the picker to preselect.
pub fn region_index(name: &str) -> Option<usize> {
    REGIONS.iter().position(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_regions_resolve_to_dial_codes() {
        assert_eq!(region_code("India"), Some("+91"));
        assert_eq!(region_code("United States"), Some("+1"));
        assert_eq!(region_code("United Arab Emirates"), Some("+971"));
    }

    #[test]
    fn unknown_or_differently_cased_names_do_not_resolve() {
        assert_eq!(region_code("Atlantis"), None);
        assert_eq!(region_code("india"), None);
        assert_eq!(region_code(""), None);
    }

    #[test]
    fn ignore_case_lookup_trims_and_folds() {
        let region = find_region_ignore_case("  united kingdom ").map(|r| r.name);
        assert_eq!(region, Some("United Kingdom"));
    }

    #[test]
    fn names_are_unique_and_keep_declaration_order() {
        let names: Vec<_> = region_names().collect();
        assert_eq!(names.first(), Some(&"India"));
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        assert_eq!(region_index("Canada"), Some(3));
    }

    #[test]
    fn every_code_is_a_plus_prefixed_number() {
        for r in REGIONS {
            let digits = r.code.strip_prefix('+').unwrap_or_default();
            assert!(!digits.is_empty(), "{} has no digits", r.name);
            assert!(digits.chars().all(|c| c.is_ascii_digit()), "{}", r.name);
        }
    }
}

//! Local customer data provider
//!
//! In-process stand-in for a customer directory service: returns the full
//! record list in one call. The dataset is generated deterministically so the
//! view (and its tests) see identical records on every load.

use crate::types::{Country, Customer, Representative};
use chrono::NaiveDate;

const CUSTOMER_COUNT: u64 = 200;

const FIRST_NAMES: [&str; 12] = [
    "James", "Amy", "Ioni", "Asiya", "Onyama", "Xuxue", "Elwin", "Mikael", "Geraldine", "Stacey",
    "Kenneth", "Ivan",
];

const LAST_NAMES: [&str; 12] = [
    "Butt", "Elsner", "Bowers", "Javayant", "Limeta", "Feng", "Sharpe", "Mettner", "Morrison",
    "Leja", "Buttler", "Katsanis",
];

const COUNTRIES: [(&str, &str); 10] = [
    ("Algeria", "dz"),
    ("Brazil", "br"),
    ("Egypt", "eg"),
    ("France", "fr"),
    ("Germany", "de"),
    ("India", "in"),
    ("Japan", "jp"),
    ("Mexico", "mx"),
    ("Panama", "pa"),
    ("United States", "us"),
];

const COMPANIES: [&str; 6] = [
    "Benton, John B Jr",
    "Chanay, Jeffrey A Esq",
    "Chemel, James L Cpa",
    "Feltz Printing Service",
    "Printing Dimensions",
    "Chapman, Ross E Esq",
];

const REPRESENTATIVES: [&str; 5] = [
    "Amy Elsner",
    "Anna Fali",
    "Bernardo Dominic",
    "Ivan Magalhaes",
    "Onyama Limba",
];

const STATUSES: [&str; 5] = ["unqualified", "qualified", "new", "negotiation", "renewal"];

/// Splitmix-style step, good enough to spread the fixed pools around
fn next(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state >> 16
}

fn make_customer(id: u64, state: &mut u64) -> Customer {
    let first = FIRST_NAMES[(next(state) % FIRST_NAMES.len() as u64) as usize];
    let last = LAST_NAMES[(next(state) % LAST_NAMES.len() as u64) as usize];
    let (country_name, country_code) = COUNTRIES[(next(state) % COUNTRIES.len() as u64) as usize];

    let year = 2015 + (next(state) % 10) as i32;
    let month = 1 + (next(state) % 12) as u32;
    let day = 1 + (next(state) % 28) as u32;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());

    // Cent-resolution balances up to $100,000
    let balance = (next(state) % 10_000_000) as f64 / 100.0;

    Customer {
        id,
        name: format!("{} {}", first, last),
        country: Country {
            name: country_name.to_string(),
            code: country_code.to_string(),
        },
        company: COMPANIES[(next(state) % COMPANIES.len() as u64) as usize].to_string(),
        date,
        status: STATUSES[(next(state) % STATUSES.len() as u64) as usize].to_string(),
        verified: next(state) % 2 == 0,
        activity: (next(state) % 101) as u8,
        representative: Representative {
            name: REPRESENTATIVES[(next(state) % REPRESENTATIVES.len() as u64) as usize]
                .to_string(),
        },
        balance,
    }
}

/// Return the full customer list. Callers load this once and page locally.
pub fn load_customers() -> Vec<Customer> {
    let mut state: u64 = 0x5eed_1234_abcd_0001;
    (1..=CUSTOMER_COUNT)
        .map(|id| make_customer(id, &mut state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn provider_is_deterministic() {
        assert_eq!(load_customers(), load_customers());
    }

    #[test]
    fn records_have_stable_unique_ids() {
        let customers = load_customers();
        assert_eq!(customers.len(), CUSTOMER_COUNT as usize);
        let ids: HashSet<u64> = customers.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), customers.len());
    }

    #[test]
    fn fields_stay_in_display_range() {
        for c in load_customers() {
            assert!(c.activity <= 100);
            assert!(c.balance >= 0.0 && c.balance < 100_000.0);
            assert!(!c.name.is_empty());
            assert!(!c.country.name.is_empty());
        }
    }
}

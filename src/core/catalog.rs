//! The fixed catalog of query demonstrations.
//!
//! Every operation is read-only and safe to re-run. Store-backed operations
//! open their own [`Session`] and release it when they return, whether they
//! succeed or fail. Nothing is retried.

use crate::adapters::memory::sample_employees;
use crate::core::query::{self, OrderBy};
use crate::core::report::{
    AggregateReport, BasicsReport, CategoryProductRow, CategoryProductsRow, CollectionsReport,
    CustomerOrderGroups, EntitiesBasicsReport, FullNameRow, GroupingReport, JoinReport,
    LeftJoinRow, LoadTimingReport, NameRow, NumberPair, OrderContactRow, OrderLine,
    SelectManyReport, SetReport, YearGroup,
};
use crate::core::session::Session;
use crate::domain::model::{Category, Customer, Employee, Order, Product};
use crate::domain::ports::RecordStore;
use crate::utils::error::Result;
use crate::utils::monitor::PhaseTimer;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::time::Duration;

pub const NUMBERS_A: [i32; 7] = [0, 2, 4, 5, 6, 8, 9];
pub const NUMBERS_B: [i32; 5] = [1, 3, 5, 7, 8];
pub const JOIN_CATEGORY_NAMES: [&str; 5] = [
    "Beverages",
    "Condiments",
    "Vegetables",
    "Dairy Products",
    "Seafood",
];
const NO_CATEGORY: &str = "(No category)";

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MAX)
}

pub struct Catalog<'s> {
    store: &'s dyn RecordStore,
    latency: Duration,
    employees: Vec<Employee>,
}

impl<'s> Catalog<'s> {
    pub fn new(store: &'s dyn RecordStore, latency: Duration) -> Self {
        Self {
            store,
            latency,
            employees: sample_employees(),
        }
    }

    pub fn with_employees(mut self, employees: Vec<Employee>) -> Self {
        self.employees = employees;
        self
    }

    fn session(&self) -> Result<Session<'s>> {
        Session::open(self.store, self.latency)
    }

    pub fn basics(&self) -> BasicsReport {
        basics(&self.employees)
    }

    /// Customers whose contact name contains "Mar", by city then country.
    pub fn entities_basics(&self) -> Result<EntitiesBasicsReport> {
        let session = self.session()?;
        let matching = session.fetch_where(|c: &Customer| c.contact_name.contains("Mar"))?;

        let order = OrderBy::ascending(|c: &Customer| c.city.clone())
            .then_ascending(|c: &Customer| c.country.clone());
        Ok(EntitiesBasicsReport {
            customers: order.sorted(matching),
        })
    }

    pub fn select_many(&self, numbers_a: &[i32], numbers_b: &[i32]) -> Result<SelectManyReport> {
        let pairs = number_pairs(numbers_a, numbers_b);

        let session = self.session()?;
        let orders: Vec<Order> = session.fetch()?;
        let customers: Vec<Customer> = session.fetch()?;
        let cutoff = ymd(1998, 1, 1);

        let orders = query::cross_where(&orders, &customers, move |o, _| {
            o.order_date.is_some_and(|d| d < cutoff)
        })
        .filter_map(|(o, c)| {
            o.order_date.map(|order_date| OrderContactRow {
                order_id: o.id,
                order_date,
                contact_name: c.contact_name.clone(),
            })
        })
        .collect();

        Ok(SelectManyReport { pairs, orders })
    }

    pub fn aggregates(&self, threshold: Decimal) -> Result<AggregateReport> {
        let session = self.session()?;
        let products: Vec<Product> = session.fetch()?;
        Ok(aggregate_prices(&products, threshold))
    }

    /// First / FirstOrDefault / Single over categories with id > 3.
    pub fn collections(&self) -> Result<CollectionsReport> {
        let session = self.session()?;
        let categories = session.fetch_where(|c: &Category| c.id > 3)?;

        let first = query::first(&categories, "category with id > 3")?.clone();
        let first_produce = query::first_where(
            &categories,
            |c| c.name == "Produce",
            "category named 'Produce'",
        )?
        .clone();
        let first_nuts = query::first_or_none(&categories, |c| c.name == "Nuts").cloned();
        let single_produce = query::single_where(
            &categories,
            |c| c.name == "Produce",
            "category named 'Produce'",
        )?
        .clone();

        Ok(CollectionsReport {
            first,
            first_produce,
            first_nuts,
            single_produce,
        })
    }

    pub fn join(&self, category_names: &[&str]) -> Result<JoinReport> {
        let session = self.session()?;
        let products: Vec<Product> = session.fetch()?;
        let categories: Vec<Category> = session.fetch()?;

        let named: Vec<CategoryProductRow> =
            query::inner_join(&products, &categories, |p| p.category_id, |c| Some(c.id))
                .map(|(p, c)| CategoryProductRow {
                    category: c.name.clone(),
                    product_name: p.name.clone(),
                })
                .collect();

        let inner = query::inner_join(
            category_names,
            &named,
            |name| name.to_string(),
            |row| row.category.clone(),
        )
        .map(|(_, row)| row.clone())
        .collect();

        let grouped = query::group_join(
            category_names,
            &named,
            |name| name.to_string(),
            |row| row.category.clone(),
        )
        .map(|(name, rows)| CategoryProductsRow {
            category: name.to_string(),
            product_names: rows.into_iter().map(|r| r.product_name.clone()).collect(),
        })
        .collect();

        let left_outer =
            query::left_join(&categories, &products, |c| Some(c.id), |p| p.category_id)
                .map(|(c, p)| LeftJoinRow {
                    category: c.name.clone(),
                    product_name: p.map(|p| p.name.clone()),
                })
                .collect();

        Ok(JoinReport {
            inner,
            grouped,
            left_outer,
        })
    }

    pub fn grouping(&self) -> Result<GroupingReport> {
        let session = self.session()?;
        let products: Vec<Product> = session.fetch()?;
        let categories: Vec<Category> = session.fetch()?;
        let customers: Vec<Customer> = session.fetch()?;
        let orders: Vec<Order> = session.fetch()?;

        let categorized =
            query::left_join(&products, &categories, |p| p.category_id, |c| Some(c.id)).map(
                |(p, c)| {
                    let category = c.map_or_else(|| NO_CATEGORY.to_string(), |c| c.name.clone());
                    (category, p.name.clone())
                },
            );
        let products_by_category = query::group_by(categorized, |(category, _)| category.clone())
            .into_iter()
            .map(|g| query::Group {
                key: g.key,
                items: g.items.into_iter().map(|(_, name)| name).collect(),
            })
            .collect();

        let customers = OrderBy::ascending(|c: &Customer| c.company_name.clone()).sorted(customers);
        let customer_orders = query::group_join(
            &customers,
            &orders,
            |c| c.id.clone(),
            |o| o.customer_id.clone(),
        )
        .map(|(c, orders)| CustomerOrderGroups {
            company_name: c.company_name.clone(),
            years: group_orders_by_month(orders.into_iter().cloned()),
        })
        .collect();

        Ok(GroupingReport {
            products_by_category,
            customer_orders,
        })
    }

    /// UNION / INTERSECT / EXCEPT of first letters of product and company names.
    pub fn set_letters(&self) -> Result<SetReport> {
        let session = self.session()?;
        let product_names = session.project(|p: &Product| p.name.clone())?;
        let company_names = session.project(|c: &Customer| c.company_name.clone())?;
        Ok(letter_sets(&product_names, &company_names))
    }

    /// Lists every customer's orders twice, navigating lazily and then with
    /// orders included up front, and times both passes.
    pub fn load_timing(&self) -> Result<LoadTimingReport> {
        let session = self.session()?;

        let timer = PhaseTimer::start("Lazy loading", session.round_trips());
        let customers: Vec<Customer> = session.fetch()?;
        let mut lazy_orders = Vec::new();
        for customer in &customers {
            let orders = session.orders_of(customer)?;
            lazy_orders.extend(orders.iter().map(OrderLine::from_order));
        }
        let lazy = timer.finish(session.round_trips());

        let timer = PhaseTimer::start("Eager loading", session.round_trips());
        let eager_orders = session
            .customers_including_orders()?
            .iter()
            .flat_map(|row| row.orders.iter().map(OrderLine::from_order))
            .collect();
        let eager = timer.finish(session.round_trips());

        Ok(LoadTimingReport {
            lazy_orders,
            eager_orders,
            lazy,
            eager,
        })
    }
}

pub fn basics(employees: &[Employee]) -> BasicsReport {
    let cutoff = ymd(2010, 1, 1);

    let born_before_2010: Vec<Employee> = employees
        .iter()
        .filter(|e| e.birth_date < cutoff)
        .cloned()
        .collect();
    let managers: Vec<Employee> = born_before_2010
        .iter()
        .filter(|e| e.job_title.contains("Manager"))
        .cloned()
        .collect();

    let managers_by_birth = OrderBy::ascending(|e: &Employee| e.birth_date).sorted(managers.clone());
    let managers_by_birth_desc =
        OrderBy::descending(|e: &Employee| e.birth_date).sorted(managers.clone());
    let managers_ranked = OrderBy::descending(|e: &Employee| e.birth_date)
        .then_ascending(|e: &Employee| e.last_name.clone())
        .sorted(managers.clone());

    let names = born_before_2010
        .iter()
        .map(|e| NameRow {
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
        })
        .collect();
    let full_names = born_before_2010
        .iter()
        .map(|e| FullNameRow {
            id: e.id,
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            full_name: e.full_name(),
        })
        .collect();

    BasicsReport {
        born_before_2010,
        managers,
        managers_by_birth,
        managers_by_birth_desc,
        managers_ranked,
        names,
        full_names,
    }
}

pub fn number_pairs(numbers_a: &[i32], numbers_b: &[i32]) -> Vec<NumberPair> {
    query::cross_where(numbers_a, numbers_b, |a, b| a < b)
        .map(|(&a, &b)| NumberPair { a, b })
        .collect()
}

/// Sum, count, any and all are taken against `threshold`; max is over every price.
pub fn aggregate_prices(products: &[Product], threshold: Decimal) -> AggregateReport {
    let below = |p: &&Product| p.unit_price < threshold;

    AggregateReport {
        threshold,
        total_products: products.len(),
        any_below: products.iter().any(|p| below(&p)),
        all_below: products.iter().all(|p| below(&p)),
        count_below: products.iter().filter(below).count(),
        sum_below: products.iter().filter(below).map(|p| p.unit_price).sum(),
        max_price: products.iter().map(|p| p.unit_price).max(),
    }
}

pub fn first_letters(names: &[String]) -> Vec<char> {
    names.iter().filter_map(|n| n.chars().next()).collect()
}

pub fn letter_sets(first: &[String], second: &[String]) -> SetReport {
    let a = first_letters(first);
    let b = first_letters(second);

    let sorted = |letters: Vec<char>| OrderBy::ascending(|c: &char| *c).sorted(letters);
    SetReport {
        union: sorted(query::union(a.clone(), b.clone()).collect()),
        intersect: sorted(query::intersect(a.clone(), b.clone()).collect()),
        except: sorted(query::except(a, b).collect()),
    }
}

/// Dated orders grouped by year, each year grouped again by month.
pub fn group_orders_by_month<I>(orders: I) -> Vec<YearGroup>
where
    I: IntoIterator<Item = Order>,
{
    let dated = orders.into_iter().filter(|o| o.order_date.is_some());

    query::group_by(dated, |o| o.order_date.map(|d| d.year()).unwrap_or_default())
        .into_iter()
        .map(|year| YearGroup {
            year: year.key,
            months: query::group_by(year.items, |o| {
                o.order_date.map(|d| d.month()).unwrap_or_default()
            }),
        })
        .collect()
}

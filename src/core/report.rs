//! Named result rows for every catalog operation and their console rendering.

use crate::core::query::Group;
use crate::domain::model::{Category, Customer, Employee, Order};
use crate::utils::monitor::PhaseStats;
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub const NO_PRODUCTS: &str = "(No products)";
pub const NO_VALUE: &str = "(no value)";

/// Turns a report into the lines printed by the dispatcher.
pub trait Render {
    fn render(&self) -> Vec<String>;
}

/// US short date, e.g. `7/4/1996`.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

fn letter_list(label: &str, letters: &[char]) -> String {
    let joined: Vec<String> = letters.iter().map(|c| c.to_string()).collect();
    format!("{} Letters: {}", label, joined.join(", "))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRow {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullNameRow {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

#[derive(Debug, Clone)]
pub struct BasicsReport {
    pub born_before_2010: Vec<Employee>,
    pub managers: Vec<Employee>,
    pub managers_by_birth: Vec<Employee>,
    pub managers_by_birth_desc: Vec<Employee>,
    /// Birth date descending, ties by last name.
    pub managers_ranked: Vec<Employee>,
    pub names: Vec<NameRow>,
    pub full_names: Vec<FullNameRow>,
}

impl Render for BasicsReport {
    fn render(&self) -> Vec<String> {
        let mut lines = vec!["Managers:".to_string()];
        lines.extend(self.managers_ranked.iter().map(Employee::full_name));
        lines.push(String::new());

        lines.push("Separate Names:".to_string());
        lines.extend(
            self.names
                .iter()
                .map(|n| format!("Name: {} {}", n.first_name, n.last_name)),
        );
        lines.push(String::new());

        lines.push("Combined Names:".to_string());
        lines.extend(self.full_names.iter().map(|n| format!("Name: {}", n.full_name)));
        lines
    }
}

#[derive(Debug, Clone)]
pub struct EntitiesBasicsReport {
    pub customers: Vec<Customer>,
}

impl Render for EntitiesBasicsReport {
    fn render(&self) -> Vec<String> {
        self.customers
            .iter()
            .map(|c| format!("Customer: {}", c.contact_name))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberPair {
    pub a: i32,
    pub b: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderContactRow {
    pub order_id: u32,
    pub order_date: NaiveDate,
    pub contact_name: String,
}

#[derive(Debug, Clone)]
pub struct SelectManyReport {
    pub pairs: Vec<NumberPair>,
    pub orders: Vec<OrderContactRow>,
}

impl Render for SelectManyReport {
    fn render(&self) -> Vec<String> {
        let pairs = self.pairs.iter().map(|p| format!("{{{}, {}}}", p.a, p.b));
        let orders = self.orders.iter().map(|o| {
            format!(
                "ID: {}, Date: {}, Contact: {}",
                o.order_id,
                short_date(o.order_date),
                o.contact_name
            )
        });
        pairs.chain(orders).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateReport {
    pub threshold: Decimal,
    pub total_products: usize,
    pub any_below: bool,
    pub all_below: bool,
    pub count_below: usize,
    pub sum_below: Decimal,
    pub max_price: Option<Decimal>,
}

impl Render for AggregateReport {
    fn render(&self) -> Vec<String> {
        let max = self
            .max_price
            .map(|p| format!("${}", p))
            .unwrap_or_else(|| NO_VALUE.to_string());
        vec![
            format!("Total Price: ${}", self.sum_below),
            format!("# of Products: {}", self.total_products),
            format!(
                "# of Products (Price < ${}): {}",
                self.threshold, self.count_below
            ),
            format!("Any Product Below ${}: {}", self.threshold, self.any_below),
            format!("All Products Below ${}: {}", self.threshold, self.all_below),
            format!("Maximum Price: {}", max),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct CollectionsReport {
    pub first: Category,
    pub first_produce: Category,
    pub first_nuts: Option<Category>,
    pub single_produce: Category,
}

impl Render for CollectionsReport {
    fn render(&self) -> Vec<String> {
        vec![
            format!("First category: {}", self.first.name),
            format!("First 'Produce' category: #{}", self.first_produce.id),
            format!(
                "First 'Nuts' category: {}",
                self.first_nuts
                    .as_ref()
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| NO_VALUE.to_string())
            ),
            format!(
                "Single 'Produce' category: #{} {}",
                self.single_produce.id, self.single_produce.name
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryProductRow {
    pub category: String,
    pub product_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryProductsRow {
    pub category: String,
    pub product_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeftJoinRow {
    pub category: String,
    /// `None` when the category has no products.
    pub product_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct JoinReport {
    pub inner: Vec<CategoryProductRow>,
    pub grouped: Vec<CategoryProductsRow>,
    pub left_outer: Vec<LeftJoinRow>,
}

impl Render for JoinReport {
    fn render(&self) -> Vec<String> {
        let mut lines = vec!["Inner join:".to_string()];
        lines.extend(
            self.inner
                .iter()
                .map(|r| format!("{}: {}", r.category, r.product_name)),
        );
        lines.push(String::new());

        lines.push("Group join:".to_string());
        for row in &self.grouped {
            lines.push(format!("{} ({}):", row.category, row.product_names.len()));
            lines.extend(row.product_names.iter().map(|name| format!("  {}", name)));
        }
        lines.push(String::new());

        lines.push("Left outer join:".to_string());
        lines.extend(self.left_outer.iter().map(|r| {
            format!(
                "{}: {}",
                r.category,
                r.product_name.as_deref().unwrap_or(NO_PRODUCTS)
            )
        }));
        lines
    }
}

#[derive(Debug, Clone)]
pub struct YearGroup {
    pub year: i32,
    pub months: Vec<Group<u32, Order>>,
}

#[derive(Debug, Clone)]
pub struct CustomerOrderGroups {
    pub company_name: String,
    pub years: Vec<YearGroup>,
}

#[derive(Debug, Clone)]
pub struct GroupingReport {
    pub products_by_category: Vec<Group<String, String>>,
    pub customer_orders: Vec<CustomerOrderGroups>,
}

impl Render for GroupingReport {
    fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for group in &self.products_by_category {
            lines.extend(group.items.iter().map(|p| format!("{}: {}", group.key, p)));
        }
        lines.push(String::new());

        for customer in &self.customer_orders {
            for year in &customer.years {
                for month in &year.months {
                    lines.push(format!(
                        "{} in {}/{}: {}",
                        customer.company_name,
                        month.key,
                        year.year,
                        month.len()
                    ));
                }
            }
        }
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetReport {
    pub union: Vec<char>,
    pub intersect: Vec<char>,
    pub except: Vec<char>,
}

impl Render for SetReport {
    fn render(&self) -> Vec<String> {
        vec![
            letter_list("UNION", &self.union),
            letter_list("INTERSECT", &self.intersect),
            letter_list("EXCEPT", &self.except),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub order_id: u32,
    pub order_date: Option<NaiveDate>,
}

impl OrderLine {
    pub fn from_order(order: &Order) -> Self {
        Self {
            order_id: order.id,
            order_date: order.order_date,
        }
    }
}

impl std::fmt::Display for OrderLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.order_date {
            Some(date) => write!(f, "Order #{}, placed on {}", self.order_id, short_date(date)),
            None => write!(f, "Order #{}, placed on {}", self.order_id, NO_VALUE),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadTimingReport {
    pub lazy_orders: Vec<OrderLine>,
    pub eager_orders: Vec<OrderLine>,
    pub lazy: PhaseStats,
    pub eager: PhaseStats,
}

impl Render for LoadTimingReport {
    fn render(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.lazy_orders.iter().map(ToString::to_string).collect();
        lines.extend(self.eager_orders.iter().map(ToString::to_string));
        lines.push(format!(
            "Milliseconds with lazy loading: {} ({} round trips)",
            self.lazy.elapsed_ms(),
            self.lazy.round_trips
        ));
        lines.push(format!(
            "Milliseconds with eager loading: {} ({} round trips)",
            self.eager.elapsed_ms(),
            self.eager.round_trips
        ));
        lines
    }
}

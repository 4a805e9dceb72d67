use crate::domain::model::{Category, Customer, Dataset, Employee, Order, Product};
use crate::domain::ports::RecordStore;
use crate::utils::error::{QueryError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Record store backed by a dataset held in memory.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    dataset: Dataset,
    online: bool,
}

impl MemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            online: true,
        }
    }

    /// Northwind-style sample data used when no data file is configured.
    pub fn sample() -> Self {
        Self::new(sample_dataset())
    }

    /// A store that refuses every connection.
    pub fn offline() -> Self {
        Self {
            dataset: Dataset::default(),
            online: false,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl RecordStore for MemoryStore {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn ping(&self) -> Result<()> {
        if self.online {
            Ok(())
        } else {
            Err(QueryError::unavailable(self.describe(), "store is offline"))
        }
    }

    fn load_products(&self) -> Result<Vec<Product>> {
        self.ping()?;
        Ok(self.dataset.products.clone())
    }

    fn load_categories(&self) -> Result<Vec<Category>> {
        self.ping()?;
        Ok(self.dataset.categories.clone())
    }

    fn load_customers(&self) -> Result<Vec<Customer>> {
        self.ping()?;
        Ok(self.dataset.customers.clone())
    }

    fn load_orders(&self) -> Result<Vec<Order>> {
        self.ping()?;
        Ok(self.dataset.orders.clone())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn employee(id: u32, first: &str, last: &str, birth: NaiveDate, title: &str) -> Employee {
    Employee {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        birth_date: birth,
        job_title: title.to_string(),
    }
}

/// The static store employee list.
pub fn sample_employees() -> Vec<Employee> {
    vec![
        employee(1, "Tony", "Jefferson", date(1955, 9, 25), "Store Manager"),
        employee(2, "Marcia", "Levinson", date(1998, 3, 1), "Produce Manager"),
        employee(3, "Alex", "Gonzalez", date(1989, 1, 15), "Cashier"),
        employee(4, "Mikhail", "Severin", date(1977, 4, 28), "Stocking Manager"),
        employee(5, "Travis", "Ishikawa", date(1983, 10, 1), "Public Relations Specialist"),
        employee(6, "Grace", "Jones", date(1960, 11, 1), "Quality Control Specialist"),
        employee(7, "Leah", "Goldman", date(1997, 1, 1), "Cashier"),
        employee(8, "Esmail", "Salas", date(1997, 5, 31), "Lead Cashier"),
    ]
}

fn category(id: u32, name: &str, description: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn product(id: u32, name: &str, category_id: u32, cents: i64) -> Product {
    Product {
        id,
        name: name.to_string(),
        category_id: Some(category_id),
        unit_price: Decimal::new(cents, 2),
        discontinued: false,
    }
}

fn customer(id: &str, company: &str, contact: &str, city: &str, country: &str) -> Customer {
    Customer {
        id: id.to_string(),
        company_name: company.to_string(),
        contact_name: contact.to_string(),
        city: city.to_string(),
        country: country.to_string(),
    }
}

fn order(id: u32, customer_id: &str, order_date: Option<NaiveDate>) -> Order {
    Order {
        id,
        customer_id: customer_id.to_string(),
        order_date,
    }
}

pub fn sample_dataset() -> Dataset {
    Dataset {
        categories: vec![
            category(1, "Beverages", "Soft drinks, coffees, teas, beers, and ales"),
            category(2, "Condiments", "Sweet and savory sauces, relishes, spreads, and seasonings"),
            category(3, "Confections", "Desserts, candies, and sweet breads"),
            category(4, "Dairy Products", "Cheeses"),
            category(5, "Grains/Cereals", "Breads, crackers, pasta, and cereal"),
            category(6, "Meat/Poultry", "Prepared meats"),
            category(7, "Produce", "Dried fruit and bean curd"),
            category(8, "Seafood", "Seaweed and fish"),
        ],
        products: vec![
            product(1, "Chai", 1, 1800),
            product(2, "Chang", 1, 1900),
            product(3, "Aniseed Syrup", 2, 1000),
            product(4, "Chef Anton's Cajun Seasoning", 2, 2200),
            product(16, "Pavlova", 3, 1745),
            product(19, "Teatime Chocolate Biscuits", 3, 920),
            product(11, "Queso Cabrales", 4, 2100),
            product(12, "Queso Manchego La Pastora", 4, 3800),
            product(9, "Mishi Kobe Niku", 6, 9700),
            product(17, "Alice Mutton", 6, 3900),
            product(7, "Uncle Bob's Organic Dried Pears", 7, 3000),
            product(14, "Tofu", 7, 2325),
            product(10, "Ikura", 8, 3100),
            product(13, "Konbu", 8, 600),
            product(18, "Carnarvon Tigers", 8, 6250),
        ],
        customers: vec![
            customer("ALFKI", "Alfreds Futterkiste", "Maria Anders", "Berlin", "Germany"),
            customer("ANATR", "Ana Trujillo Emparedados y helados", "Ana Trujillo", "México D.F.", "Mexico"),
            customer("AROUT", "Around the Horn", "Thomas Hardy", "London", "UK"),
            customer("BOLID", "Bólido Comidas preparadas", "Martín Sommer", "Madrid", "Spain"),
            customer("HANAR", "Hanari Carnes", "Mario Pontes", "Rio de Janeiro", "Brazil"),
            customer("PARIS", "Paris spécialités", "Marie Bertrand", "Paris", "France"),
            customer("QUICK", "QUICK-Stop", "Horst Kloss", "Cunewalde", "Germany"),
        ],
        orders: vec![
            order(10248, "HANAR", Some(date(1996, 7, 4))),
            order(10250, "HANAR", Some(date(1996, 7, 8))),
            order(10253, "HANAR", Some(date(1996, 7, 10))),
            order(10308, "ANATR", Some(date(1996, 9, 18))),
            order(10355, "AROUT", Some(date(1996, 11, 15))),
            order(10326, "BOLID", Some(date(1996, 10, 10))),
            order(10625, "ANATR", Some(date(1997, 8, 8))),
            order(10643, "ALFKI", Some(date(1997, 8, 25))),
            order(10692, "ALFKI", Some(date(1997, 10, 3))),
            order(10702, "ALFKI", Some(date(1997, 10, 13))),
            order(10801, "BOLID", Some(date(1997, 12, 29))),
            order(10835, "ALFKI", Some(date(1998, 1, 15))),
            order(10952, "ALFKI", Some(date(1998, 3, 16))),
            order(11011, "ALFKI", Some(date(1998, 4, 9))),
            order(10970, "BOLID", Some(date(1998, 3, 24))),
            order(11099, "QUICK", None),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_references_are_consistent() {
        let data = sample_dataset();

        for p in &data.products {
            let id = p.category_id.unwrap();
            assert!(data.categories.iter().any(|c| c.id == id), "product {}", p.name);
        }
        for o in &data.orders {
            assert!(data.customers.iter().any(|c| c.id == o.customer_id), "order {}", o.id);
        }
    }

    #[test]
    fn test_offline_store_refuses_loads() {
        let store = MemoryStore::offline();
        assert!(matches!(
            store.load_products(),
            Err(QueryError::DataSourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_employee_full_name() {
        let employees = sample_employees();
        assert_eq!(employees.len(), 8);
        assert_eq!(employees[0].full_name(), "Tony Jefferson");
    }
}

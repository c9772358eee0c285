use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use till_shared::models::{
    Category, Customer, Employee, LineItem, Order, OrderStatus, Payment, PaymentMethod,
    PaymentStatus, Product,
};
use till_shared::pii::Masked;

pub struct SampleData {
    pub categories: Vec<Category>,
    pub customers: Vec<Customer>,
    pub employees: Vec<Employee>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub line_items: Vec<LineItem>,
    pub payments: Vec<Payment>,
}

const fn fixed(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

const MENS_WEAR: Uuid = fixed(0x0C01);
const WOMENS_WEAR: Uuid = fixed(0x0C02);
const ACCESSORIES: Uuid = fixed(0x0C03);

const JOHN: Uuid = fixed(0x0A01);
const JANE: Uuid = fixed(0x0A02);
const MARK: Uuid = fixed(0x0A03);

const ALICE: Uuid = fixed(0x0E01);
const BOB: Uuid = fixed(0x0E02);

const JEANS: Uuid = fixed(0x0F01);
const DRESS: Uuid = fixed(0x0F02);
const BELT: Uuid = fixed(0x0F03);
const SOCKS: Uuid = fixed(0x0F04);

const ORDER_1: Uuid = fixed(0x0D01);
const ORDER_2: Uuid = fixed(0x0D02);
const ORDER_3: Uuid = fixed(0x0D03);

/// The demo data set loaded by `SchemaAdmin::seed_sample_data`. Identifiers
/// are fixed so repeated seeding upserts the same rows instead of piling up
/// duplicates, and the rows are internally consistent: each order's total
/// matches its line items and its status matches its payments.
pub fn sample_data() -> SampleData {
    let now = Utc::now();

    let categories = vec![
        Category { id: MENS_WEAR, name: "Men's Wear".into() },
        Category { id: WOMENS_WEAR, name: "Women's Wear".into() },
        Category { id: ACCESSORIES, name: "Accessories".into() },
    ];

    let customers = vec![
        Customer {
            id: JOHN,
            name: "John Doe".into(),
            email: Some(Masked("john.doe@example.com".into())),
            phone: Masked("416-555-0101".into()),
        },
        Customer {
            id: JANE,
            name: "Jane Smith".into(),
            email: Some(Masked("jane.smith@example.com".into())),
            phone: Masked("416-555-0102".into()),
        },
        Customer {
            id: MARK,
            name: "Mark Chan".into(),
            email: None,
            phone: Masked("416-555-0103".into()),
        },
    ];

    let employees = vec![
        Employee {
            id: ALICE,
            name: "Alice Johnson".into(),
            email: Masked("alice.johnson@example.com".into()),
            phone: Masked("416-555-0201".into()),
            role: "Cashier".into(),
        },
        Employee {
            id: BOB,
            name: "Bob Lee".into(),
            email: Masked("bob.lee@example.com".into()),
            phone: Masked("416-555-0202".into()),
            role: "Cashier".into(),
        },
    ];

    let products = vec![
        Product {
            id: JEANS,
            name: "Blue Jeans".into(),
            size: "M".into(),
            colour: "Blue".into(),
            brand: "Levis".into(),
            price: Decimal::new(5999, 2),
            stock_qty: 100,
            category_id: MENS_WEAR,
        },
        Product {
            id: DRESS,
            name: "Red Dress".into(),
            size: "S".into(),
            colour: "Red".into(),
            brand: "Zara".into(),
            price: Decimal::new(8950, 2),
            stock_qty: 80,
            category_id: WOMENS_WEAR,
        },
        Product {
            id: BELT,
            name: "Leather Belt".into(),
            size: "L".into(),
            colour: "Brown".into(),
            brand: "Fossil".into(),
            price: Decimal::new(1999, 2),
            stock_qty: 200,
            category_id: ACCESSORIES,
        },
        Product {
            id: SOCKS,
            name: "Socks".into(),
            size: "M".into(),
            colour: "White".into(),
            brand: "Hanes".into(),
            price: Decimal::new(599, 2),
            stock_qty: 500,
            category_id: ACCESSORIES,
        },
    ];

    let orders = vec![
        // Jeans + belt, fully paid by credit.
        Order {
            id: ORDER_1,
            order_date: now,
            total_amount: Decimal::new(7998, 2),
            status: OrderStatus::Completed,
            customer_id: JOHN,
            employee_id: ALICE,
        },
        // A dress with a cash payment still pending.
        Order {
            id: ORDER_2,
            order_date: now,
            total_amount: Decimal::new(8950, 2),
            status: OrderStatus::Pending,
            customer_id: JANE,
            employee_id: BOB,
        },
        // Four pairs of socks, paid by debit.
        Order {
            id: ORDER_3,
            order_date: now,
            total_amount: Decimal::new(2396, 2),
            status: OrderStatus::Completed,
            customer_id: MARK,
            employee_id: ALICE,
        },
    ];

    let line_items = vec![
        LineItem::new(ORDER_1, JEANS, 1, Decimal::new(5999, 2)),
        LineItem::new(ORDER_1, BELT, 1, Decimal::new(1999, 2)),
        LineItem::new(ORDER_2, DRESS, 1, Decimal::new(8950, 2)),
        LineItem::new(ORDER_3, SOCKS, 4, Decimal::new(599, 2)),
    ];

    let payments = vec![
        Payment {
            id: fixed(0x0B01),
            order_id: ORDER_1,
            method: PaymentMethod::Credit,
            amount: Decimal::new(7998, 2),
            status: PaymentStatus::Paid,
        },
        Payment {
            id: fixed(0x0B02),
            order_id: ORDER_2,
            method: PaymentMethod::Cash,
            amount: Decimal::new(8950, 2),
            status: PaymentStatus::Pending,
        },
        Payment {
            id: fixed(0x0B03),
            order_id: ORDER_3,
            method: PaymentMethod::Debit,
            amount: Decimal::new(2396, 2),
            status: PaymentStatus::Paid,
        },
    ];

    SampleData {
        categories,
        customers,
        employees,
        products,
        orders,
        line_items,
        payments,
    }
}

//! # Shell
//!
//! Reads lines from stdin, parses each with clap and runs the matching
//! command against the session.
//!
//! ## Line Grammar
//! ```text
//! menu [--search TEXT] [--category NAME]
//! product ID
//! add ID [--sweetness less|normal|more] [--ice none|less|normal|more] [--note TEXT]
//! cart
//! update ID QTY [--sweetness ..] [--ice ..]     no flags: every line of ID
//! remove ID [--sweetness ..] [--ice ..]         no flags: every line of ID
//! clear
//! checkout --name .. --phone .. --address .. [--note ..]
//! admin products [--search TEXT]
//! admin create-product --name .. --price .. --stock .. --category .. [..]
//! admin update-product ID --name .. --price .. --stock .. --category .. [..]
//! admin delete-product ID
//! admin orders [--status CODE] [--search TEXT] [--date YYYY-MM-DD]
//! admin order|confirm|complete|cancel|delete-order ID
//! admin dashboard
//! exit
//! ```
//! Arguments with spaces go in single or double quotes.

use std::io::Write;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use trasua_core::{
    CustomerInfo, Customization, Ice, LineTarget, Money, OrderFilter, OrderStatus, ProductDraft,
    ProductId, ProductStatus, ShopFilter, Sweetness, VariantKey,
};

use crate::commands::{cart, dashboard, order, product};
use crate::error::{AppError, AppResult};
use crate::state::Session;

const PROMPT: &str = "trasua> ";

// =============================================================================
// Grammar
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "trasua", no_binary_name = true, disable_version_flag = true)]
#[command(about = "Trà Sữa shop shell")]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Show drinks that can be ordered now
    Menu {
        #[arg(short, long)]
        search: Option<String>,
        /// Category name, or "all"
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product
    Product { id: String },
    /// Add one drink to the cart
    Add {
        product_id: String,
        #[command(flatten)]
        variant: VariantArgs,
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// Show the cart
    Cart,
    /// Set the quantity of cart lines (0 or less removes them)
    Update {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Remove cart lines
    Remove {
        product_id: String,
        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Empty the cart
    Clear,
    /// Place an order for the cart
    Checkout {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Admin screens
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

#[derive(Debug, Args)]
pub struct VariantArgs {
    #[arg(short, long)]
    pub sweetness: Option<Sweetness>,
    #[arg(short, long)]
    pub ice: Option<Ice>,
}

impl VariantArgs {
    /// One line when a level is given, otherwise every line of the product.
    pub fn target(&self, product_id: &str) -> LineTarget {
        if self.sweetness.is_none() && self.ice.is_none() {
            return LineTarget::Product(ProductId::new(product_id));
        }
        LineTarget::Variant(VariantKey::new(
            product_id,
            self.sweetness.unwrap_or_default(),
            self.ice.unwrap_or_default(),
        ))
    }

    pub fn customization(&self, note: &str) -> Customization {
        Customization::default()
            .with_sweetness(self.sweetness.unwrap_or_default())
            .with_ice(self.ice.unwrap_or_default())
            .with_note(note.trim())
    }
}

#[derive(Debug, Subcommand)]
pub enum AdminAction {
    /// List or search the whole catalog
    Products {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a product
    CreateProduct {
        #[command(flatten)]
        form: ProductForm,
    },
    /// Replace a product's details
    UpdateProduct {
        id: String,
        #[command(flatten)]
        form: ProductForm,
    },
    /// Remove a product
    DeleteProduct { id: String },
    /// List orders
    Orders {
        /// Status code, e.g. cho_xac_nhan
        #[arg(long)]
        status: Option<OrderStatus>,
        /// Customer name or phone
        #[arg(short, long)]
        search: Option<String>,
        /// Day the order was placed, YYYY-MM-DD
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Show one order with its items
    Order { id: String },
    /// cho_xac_nhan → dang_xu_ly
    Confirm { id: String },
    /// dang_xu_ly → hoan_thanh
    Complete { id: String },
    /// Cancel and restock
    Cancel { id: String },
    /// Delete a cancelled or completed order
    DeleteOrder { id: String },
    /// Product and order counters
    Dashboard,
}

#[derive(Debug, Args)]
pub struct ProductForm {
    #[arg(long)]
    pub name: String,
    /// Price in đồng
    #[arg(long, allow_negative_numbers = true)]
    pub price: i64,
    #[arg(long, allow_negative_numbers = true)]
    pub stock: i64,
    #[arg(long)]
    pub category: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "co_san")]
    pub status: ProductStatus,
}

impl From<ProductForm> for ProductDraft {
    fn from(form: ProductForm) -> Self {
        ProductDraft {
            name: form.name.trim().to_string(),
            description: form.description.trim().to_string(),
            price: Money::from_dong(form.price),
            stock: form.stock,
            category: form.category.trim().to_string(),
            status: form.status,
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Result of reading one line.
#[derive(Debug)]
pub enum Parsed {
    Empty,
    Command(ShellCommand),
    /// Help text or a usage error to show as-is.
    Message(String),
}

pub fn parse_line(line: &str) -> Parsed {
    let Some(words) = shlex::split(line) else {
        return Parsed::Message("unterminated quote or trailing backslash".to_string());
    };

    if words.is_empty() {
        return Parsed::Empty;
    }

    match ShellLine::try_parse_from(words) {
        Ok(parsed) => Parsed::Command(parsed.command),
        Err(e) => Parsed::Message(e.render().to_string()),
    }
}

// =============================================================================
// Execution
// =============================================================================

/// What the loop does after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Exit,
}

fn render<T: Serialize>(value: &T) -> AppResult<Outcome> {
    serde_json::to_string_pretty(value)
        .map(Outcome::Print)
        .map_err(|e| AppError::internal(e.to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn execute(session: &mut Session, command: ShellCommand) -> AppResult<Outcome> {
    match command {
        ShellCommand::Menu { search, category } => {
            let filter = ShopFilter {
                search: non_empty(search),
                category: non_empty(category),
            };
            render(&product::list_shop_products(session, filter).await?)
        }
        ShellCommand::Product { id } => {
            render(&product::get_product(session, &ProductId::new(id)).await?)
        }
        ShellCommand::Add {
            product_id,
            variant,
            note,
        } => {
            let customization = variant.customization(&note);
            render(&cart::add_to_cart(session, &ProductId::new(product_id), customization).await?)
        }
        ShellCommand::Cart => render(&cart::get_cart(session)),
        ShellCommand::Update {
            product_id,
            quantity,
            variant,
        } => render(&cart::update_cart_item(session, variant.target(&product_id), quantity).await?),
        ShellCommand::Remove {
            product_id,
            variant,
        } => render(&cart::remove_from_cart(session, variant.target(&product_id))),
        ShellCommand::Clear => render(&cart::clear_cart(session)),
        ShellCommand::Checkout {
            name,
            phone,
            address,
            note,
        } => {
            let customer = CustomerInfo {
                customer_name: name,
                phone,
                address,
                order_note: note,
            };
            render(&order::checkout(session, customer).await?)
        }
        ShellCommand::Admin { action } => execute_admin(session, action).await,
        ShellCommand::Exit => Ok(Outcome::Exit),
    }
}

async fn execute_admin(session: &mut Session, action: AdminAction) -> AppResult<Outcome> {
    match action {
        AdminAction::Products { search } => match non_empty(search) {
            Some(query) => render(&product::search_products(session, &query).await?),
            None => render(&product::list_products(session).await?),
        },
        AdminAction::CreateProduct { form } => {
            render(&product::create_product(session, form.into()).await?)
        }
        AdminAction::UpdateProduct { id, form } => {
            render(&product::update_product(session, &ProductId::new(id), form.into()).await?)
        }
        AdminAction::DeleteProduct { id } => {
            product::delete_product(session, &ProductId::new(id.as_str())).await?;
            Ok(Outcome::Print(format!("Deleted product {}", id)))
        }
        AdminAction::Orders {
            status,
            search,
            date,
        } => {
            let filter = OrderFilter {
                status,
                search: non_empty(search),
                date,
            };
            render(&order::list_orders(session, filter).await?)
        }
        AdminAction::Order { id } => render(&order::get_order(session, &id).await?),
        AdminAction::Confirm { id } => render(&order::confirm_order(session, &id).await?),
        AdminAction::Complete { id } => render(&order::complete_order(session, &id).await?),
        AdminAction::Cancel { id } => render(&order::cancel_order(session, &id).await?),
        AdminAction::DeleteOrder { id } => {
            order::delete_order(session, &id).await?;
            Ok(Outcome::Print(format!("Deleted order {}", id)))
        }
        AdminAction::Dashboard => render(&dashboard::get_dashboard(session).await?),
    }
}

// =============================================================================
// Loop
// =============================================================================

/// Runs until `exit` or end of input.
pub async fn repl(session: &mut Session) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("End of input");
            break;
        };

        match parse_line(&line) {
            Parsed::Empty => continue,
            Parsed::Message(message) => println!("{}", message.trim_end()),
            Parsed::Command(command) => {
                debug!(command = ?command, "Running command");
                match execute(session, command).await {
                    Ok(Outcome::Print(output)) => println!("{}", output),
                    Ok(Outcome::Exit) => break,
                    Err(e) => {
                        warn!(code = %e.code, message = %e.message, "Command failed");
                        println!("{}", e);
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{envelope, product_json, session_for};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn command(line: &str) -> ShellCommand {
        match parse_line(line) {
            Parsed::Command(c) => c,
            other => panic!("expected a command for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_quoted_arguments() {
        match command(r#"checkout --name "Nguyễn Văn A" --phone 0901234567 --address '12 Lê Lợi'"#) {
            ShellCommand::Checkout { name, address, note, .. } => {
                assert_eq!(name, "Nguyễn Văn A");
                assert_eq!(address, "12 Lê Lợi");
                assert_eq!(note, "");
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(matches!(parse_line("   "), Parsed::Empty));
        assert!(matches!(parse_line("menu --search \"trà"), Parsed::Message(_)));
    }

    #[test]
    fn test_parse_add_with_levels() {
        match command("add p1 --sweetness less -i none --note 'ít trân châu'") {
            ShellCommand::Add {
                product_id,
                variant,
                note,
            } => {
                assert_eq!(product_id, "p1");
                let c = variant.customization(&note);
                assert_eq!(c.sweetness, Sweetness::Less);
                assert_eq!(c.ice, Ice::None);
                assert_eq!(c.note, "ít trân châu");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_update_target_selection() {
        match command("update p1 -3") {
            ShellCommand::Update {
                quantity, variant, ..
            } => {
                assert_eq!(quantity, -3);
                assert_eq!(variant.target("p1"), LineTarget::Product(ProductId::new("p1")));
            }
            other => panic!("unexpected {:?}", other),
        }

        match command("remove p1 --ice more") {
            ShellCommand::Remove { variant, .. } => assert_eq!(
                variant.target("p1"),
                LineTarget::Variant(VariantKey::new("p1", Sweetness::Normal, Ice::More))
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_admin_orders() {
        match command("admin orders --status dang_xu_ly --date 2024-06-01") {
            ShellCommand::Admin {
                action: AdminAction::Orders { status, date, search },
            } => {
                assert_eq!(status, Some(OrderStatus::Processing));
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1));
                assert!(search.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bad_lines_become_messages() {
        assert!(matches!(parse_line(""), Parsed::Empty));
        assert!(matches!(parse_line("fly"), Parsed::Message(_)));
        assert!(matches!(parse_line("add p1 --ice lots"), Parsed::Message(_)));
        assert!(matches!(parse_line("help"), Parsed::Message(_)));
    }

    #[test]
    fn test_product_form_into_draft() {
        match command(
            "admin create-product --name ' Trà Sữa Socola ' --price 30000 --stock 12 --category 'Trà Sữa Đặc Biệt'",
        ) {
            ShellCommand::Admin {
                action: AdminAction::CreateProduct { form },
            } => {
                let draft = ProductDraft::from(form);
                assert_eq!(draft.name, "Trà Sữa Socola");
                assert_eq!(draft.price, Money::from_dong(30_000));
                assert_eq!(draft.status, ProductStatus::Available);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_add_then_exit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sanpham/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(product_json(
                "p1",
                "Trà Sữa Trân Châu",
                25_000,
                10,
            ))))
            .mount(&server)
            .await;
        let mut session = session_for(&server);

        let outcome = execute(&mut session, command("add p1 -s more")).await.unwrap();
        let Outcome::Print(output) = outcome else {
            panic!("expected output");
        };
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["outcome"], json!({"kind": "inserted"}));
        assert_eq!(json["cart"]["items"][0]["sweetness"], "ngot");

        assert_eq!(
            execute(&mut session, command("quit")).await.unwrap(),
            Outcome::Exit
        );
    }
}

use clap::{Args as ClapArgs, Parser, Subcommand};

use brewcart_core::api::Collection;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "brewcart", version, about = "Coffee storefront: catalog, favorites and cart")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Keep state in memory only for this invocation.
    #[arg(long, global = true)]
    pub no_persist: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List catalog items.
    Catalog(CatalogArgs),
    /// List the categories of a collection.
    Categories(CategoriesArgs),
    /// Toggle the favorite mark of an item.
    Favorite(FavoriteArgs),
    /// List favorite items of both collections.
    Favorites,
    /// Show or change the cart.
    Cart(CartArgs),
    /// Pay for the cart and clear it.
    Checkout(CheckoutArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CatalogArgs {
    /// beans or coffee; both when omitted.
    #[arg(long)]
    pub collection: Option<Collection>,

    #[arg(long)]
    pub category: Option<String>,

    /// Case-insensitive text matched against name, description and
    /// special ingredient.
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CategoriesArgs {
    #[arg(long, default_value = "coffee")]
    pub collection: Collection,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct FavoriteArgs {
    pub collection: Collection,
    pub id: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CartCommand {
    /// Print the cart (default).
    Show,
    /// Add an item in one size; an existing line grows.
    Add {
        collection: Collection,
        id: String,
        size: String,
        #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Remove a line.
    Remove { id: String, size: String },
    /// Set the quantity of a line.
    Update {
        id: String,
        size: String,
        quantity: u32,
    },
    /// Empty the cart.
    Clear,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub mobile: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cart_add() {
        let args = Args::try_parse_from([
            "brewcart", "cart", "add", "coffee", "C1", "M", "--quantity", "3", "--format", "json",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        match args.command {
            Commands::Cart(CartArgs {
                command:
                    Some(CartCommand::Add {
                        collection,
                        id,
                        size,
                        quantity,
                    }),
            }) => {
                assert_eq!(collection, Collection::Coffee);
                assert_eq!(id, "C1");
                assert_eq!(size, "M");
                assert_eq!(quantity, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_collection_and_negative_quantity() {
        assert!(Args::try_parse_from(["brewcart", "favorite", "tea", "T1"]).is_err());
        assert!(
            Args::try_parse_from(["brewcart", "cart", "update", "C1", "M", "-1"]).is_err()
        );
    }

    #[test]
    fn test_cart_add_rejects_zero_quantity() {
        assert!(Args::try_parse_from([
            "brewcart", "cart", "add", "coffee", "C1", "M", "--quantity", "0",
        ])
        .is_err());
        let args =
            Args::try_parse_from(["brewcart", "cart", "update", "C1", "M", "0"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Cart(CartArgs {
                command: Some(CartCommand::Update { quantity: 0, .. })
            })
        ));
    }

    #[test]
    fn test_cart_defaults_to_show() {
        let args = Args::try_parse_from(["brewcart", "--no-persist", "cart"]).unwrap();
        assert!(args.no_persist);
        assert!(matches!(
            args.command,
            Commands::Cart(CartArgs { command: None })
        ));
    }
}

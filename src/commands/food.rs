use clap::{Args, Subcommand};
use genaifit_core::{Backend, DocumentId, FoodItem, MealType, Stored};

use super::{emit, CommandResult, OutputFormat};

#[derive(Args)]
pub struct FoodCommand {
    #[command(subcommand)]
    pub command: FoodSubcommand,
}

#[derive(Subcommand)]
pub enum FoodSubcommand {
    /// Show the food log
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Log a food item
    Add {
        /// Food name
        name: String,

        /// Meal type (breakfast, lunch, dinner, snack)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        meal_type: String,

        #[arg(long)]
        calories: f64,

        /// Protein in grams
        #[arg(long, default_value_t = 0.0)]
        protein: f64,

        /// Carbs in grams
        #[arg(long, default_value_t = 0.0)]
        carbs: f64,

        /// Fat in grams
        #[arg(long, default_value_t = 0.0)]
        fat: f64,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Remove a logged item
    Remove {
        /// Entry ID as shown by `food list`
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show calorie and macro totals for the log
    Totals {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl FoodCommand {
    pub async fn run(&self, backend: &Backend) -> CommandResult {
        let nutrition = backend.nutrition();

        match &self.command {
            FoodSubcommand::List { format } => {
                emit(format, nutrition.get_food_log().await, |log| print_log(log))
            }

            FoodSubcommand::Add {
                name,
                meal_type,
                calories,
                protein,
                carbs,
                fat,
                format,
            } => {
                let meal_type: MealType = meal_type.parse().map_err(|e: String| e)?;
                let item = FoodItem::new(name, meal_type, *calories).with_macros(*protein, *carbs, *fat);

                emit(format, nutrition.add_food_item(item).await, |log| {
                    println!("Logged {}\n", name);
                    print_log(log);
                })
            }

            FoodSubcommand::Remove { id, format } => {
                let id = DocumentId::from(id.as_str());
                emit(format, nutrition.remove_food_item(&id).await, |log| {
                    println!("Removed {}\n", id);
                    print_log(log);
                })
            }

            FoodSubcommand::Totals { format } => {
                emit(format, nutrition.daily_totals().await, |totals| {
                    println!("Totals: {}", totals)
                })
            }
        }
    }
}

fn print_log(log: &[Stored<FoodItem>]) {
    if log.is_empty() {
        println!("Food log is empty");
        return;
    }
    for item in log {
        println!("{}  {}", item.id, item.record);
    }
    println!("\nTotal: {} item(s)", log.len());
}

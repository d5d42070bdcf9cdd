use clap::{Args, Subcommand};
use genaifit_core::{Backend, DayPlan, DocumentId, Meal, MealType, Stored};

use super::{emit, parse_date, CommandResult, OutputFormat};

#[derive(Args)]
pub struct MealPlanCommand {
    #[command(subcommand)]
    pub command: MealPlanSubcommand,
}

#[derive(Subcommand)]
pub enum MealPlanSubcommand {
    /// List day plans
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create an empty plan for a date
    Add {
        /// Date (YYYY-MM-DD)
        #[arg(long, short)]
        date: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a meal to an existing plan
    AddMeal {
        /// Plan ID as shown by `mealplan list`
        id: String,

        /// Meal title
        #[arg(long)]
        title: String,

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

        /// Ingredient (can be repeated)
        #[arg(long = "ingredient", value_name = "INGREDIENT")]
        ingredients: Vec<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Remove a day plan
    Remove {
        /// Plan ID as shown by `mealplan list`
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl MealPlanCommand {
    pub async fn run(&self, backend: &Backend) -> CommandResult {
        let plans = backend.meal_plans();

        match &self.command {
            MealPlanSubcommand::List { format } => {
                emit(format, plans.get_meal_plans().await, |list| print_plans(list))
            }

            MealPlanSubcommand::Add { date, format } => {
                let date = parse_date(date)?;
                emit(format, plans.add_day_plan(DayPlan::new(date)).await, |list| {
                    println!("Created plan for {}\n", date);
                    print_plans(list);
                })
            }

            MealPlanSubcommand::AddMeal {
                id,
                title,
                meal_type,
                calories,
                protein,
                carbs,
                fat,
                ingredients,
                format,
            } => {
                let meal_type: MealType = meal_type.parse().map_err(|e: String| e)?;
                let meal = Meal::new(title, meal_type, *calories)
                    .with_macros(*protein, *carbs, *fat)
                    .with_ingredients(ingredients.clone());

                let id = DocumentId::from(id.as_str());
                emit(format, plans.add_meal(&id, meal).await, |plan| {
                    print!("{}", plan.record);
                    println!("Totals: {}", plan.totals());
                })
            }

            MealPlanSubcommand::Remove { id, format } => {
                let id = DocumentId::from(id.as_str());
                emit(format, plans.remove_day_plan(&id).await, |list| {
                    println!("Removed {}\n", id);
                    print_plans(list);
                })
            }
        }
    }
}

fn print_plans(list: &[Stored<DayPlan>]) {
    if list.is_empty() {
        println!("No meal plans found");
        return;
    }
    for plan in list {
        let count = plan.meals.len();
        println!(
            "{}  {} {:<9} {} meal(s), {:.0} kcal",
            plan.id,
            plan.date,
            plan.day,
            count,
            plan.totals().calories
        );
    }
    println!("\nTotal: {} plan(s)", list.len());
}

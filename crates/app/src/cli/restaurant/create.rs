use clap::Args;
use miam_app::{
    database::{self, Db},
    domain::restaurants::{
        PgRestaurantsService, RestaurantsService,
        data::NewRestaurant,
        records::{GeoPoint, RestaurantUuid},
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateRestaurantArgs {
    /// Restaurant display name
    #[arg(long)]
    name: String,

    #[arg(long)]
    description: Option<String>,

    /// Delivery fee in minor currency units
    #[arg(long, default_value_t = 0)]
    delivery_fee: u64,

    #[arg(long, allow_negative_numbers = true)]
    longitude: f64,

    #[arg(long, allow_negative_numbers = true)]
    latitude: f64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional restaurant UUID; generated when omitted
    #[arg(long)]
    restaurant_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateRestaurantArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgRestaurantsService::new(Db::new(pool));

    let restaurant = service
        .create_restaurant(NewRestaurant {
            uuid: args
                .restaurant_uuid
                .map_or_else(RestaurantUuid::new, RestaurantUuid::from_uuid),
            name: args.name,
            description: args.description,
            delivery_fee: args.delivery_fee,
            location: GeoPoint {
                longitude: args.longitude,
                latitude: args.latitude,
            },
        })
        .await
        .map_err(|error| format!("failed to create restaurant: {error}"))?;

    println!("restaurant_uuid: {}", restaurant.uuid);
    println!("restaurant_name: {}", restaurant.name);
    println!("delivery_fee: {}", restaurant.delivery_fee);

    Ok(())
}

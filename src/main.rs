#[rocket::launch]
fn launch() -> _ {
    usda_nutrition::init_logger();
    log::info!("starting USDA nutrient browse server");
    usda_nutrition::rocket()
}

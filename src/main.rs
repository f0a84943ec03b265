use swarmfield::app;

fn main() {
    env_logger::init();
    log::info!("swarmfield starting up");

    app::run();
}

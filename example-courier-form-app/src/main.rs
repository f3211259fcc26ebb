use courier::{
    binding::{
        CompositeDescriptor, Describe, MethodDescriptor, ParameterDescriptor, TypeDescriptor,
    },
    header::Header,
};
use courier_formatter::{FileWrapper, FormatterRegistry, Payload};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, error::Error, fs};

#[derive(Debug, Deserialize, Serialize)]
struct Order {
    sku: String,
    quantity: u32,
    gift: bool,
    notes: Option<String>,
}

impl Describe for Order {
    fn describe() -> TypeDescriptor {
        CompositeDescriptor::new("Order")
            .required_field::<String>("sku")
            .field::<u32>("quantity")
            .field::<bool>("gift")
            .field::<Option<String>>("notes")
            .build()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let registry = FormatterRegistry::with_defaults();
    tracing::info!(algorithms = ?registry.algorithms(), "formatters ready");

    // place_order(order: Order, coupons: Vec<String>, attributes: HashMap<String, String>)
    let method = MethodDescriptor::new("place_order")
        .param(ParameterDescriptor::of::<Order>().named("order").required())
        .param(ParameterDescriptor::of::<Vec<String>>().named("coupon"))
        .param(ParameterDescriptor::of::<HashMap<String, String>>());

    let mut request = Header::new();
    request.set_content_type("application/url; charset=UTF-8");
    let body = "order.sku=KB-101&order.quantity=2&order.gift=yes\
                &coupon=SPRING&&coupon=LOYAL&argument2.channel=web";

    let url = registry
        .for_content_type(request.content_type_raw().unwrap_or_default())
        .ok_or("no formatter for request content type")?;
    let args = url.deserialize(&request, &mut body.as_bytes(), "", &method)?;

    let order: Order = args.arg(0)?;
    let coupons: Vec<String> = args.arg(1)?;
    let attributes: HashMap<String, String> = args.arg(2)?;
    tracing::info!(?order, ?coupons, ?attributes, "decoded {}", method);

    // Reply with the order as JSON.
    let json = registry
        .get("application/json")
        .ok_or("JSON formatter missing")?;
    let mut response = Header::new();
    let mut out = Vec::new();
    json.serialize(&mut response, &Payload::json(&order)?, &mut out, "UTF-8")?;
    for (name, value) in &response {
        tracing::info!("{}: {}", name, value);
    }
    println!("{}", String::from_utf8_lossy(&out));

    // Reply with a receipt file as a download.
    let dir = std::env::temp_dir().join("courier-form-app");
    fs::create_dir_all(&dir)?;
    let receipt = dir.join("receipt-kb-101.txt");
    fs::write(&receipt, format!("{} x {}\n", order.quantity, order.sku))?;

    let mut response = Header::new();
    let mut out = Vec::new();
    url.serialize(
        &mut response,
        &Payload::File(FileWrapper::new(&receipt).with_name("Receipt KB-101.txt")),
        &mut out,
        "UTF-8",
    )?;
    for (name, value) in &response {
        tracing::info!("{}: {}", name, value);
    }
    println!("{}", String::from_utf8_lossy(&out));

    fs::remove_file(&receipt)?;
    Ok(())
}

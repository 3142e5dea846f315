//! Example generating proxies for a TripPin-style service model.
//!
//! Run with: `cargo run --example trippin`

use odatagen::prelude::*;

fn build_model() -> Model {
    let mut person = Class::new("Person", "Trippin", ClassKind::Entity);
    person.add_property(Property::new("UserName", TypeRef::primitive("String")));
    person.add_property(Property::new("FirstName", TypeRef::primitive("String")));
    person.add_property(Property::new(
        "Gender",
        TypeRef::named("Trippin", "PersonGender"),
    ));
    person.add_property(Property::collection(
        "Trips",
        TypeRef::named("Trippin", "Trip"),
    ));
    person.key = vec!["UserName".to_string()];

    let mut trip = Class::new("Trip", "Trippin", ClassKind::Entity);
    trip.add_property(Property::new("TripId", TypeRef::primitive("Int32")));
    trip.add_property(Property::new("Description", TypeRef::primitive("String")));
    trip.key = vec!["TripId".to_string()];

    let mut photo = Class::new("Photo", "Trippin", ClassKind::MediaEntity);
    photo.add_property(Property::new("Id", TypeRef::primitive("Int64")));
    photo.key = vec!["Id".to_string()];

    let mut container = Class::new("DefaultContainer", "Trippin", ClassKind::Service);
    container.add_property(Property::collection(
        "People",
        TypeRef::named("Trippin", "Person"),
    ));
    container.add_property(Property::new("Me", TypeRef::named("Trippin", "Person")));

    let mut gender = EnumType::new("PersonGender", "Trippin");
    gender.add_member(EnumMember::new("Male"));
    gender.add_member(EnumMember::new("Female"));
    gender.add_member(EnumMember::new("Unknown"));

    let mut ns = Namespace::new("Trippin");
    ns.add_class(person);
    ns.add_class(trip);
    ns.add_class(photo);
    ns.add_class(container);
    ns.add_enum(gender);

    let mut model = Model::new();
    model.add_namespace(ns);
    model
}

fn main() -> Result<(), CodegenError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("odatagen_codegen=debug")),
        )
        .init();

    let model = build_model();
    let config = GeneratorConfig::new().with_namespace_mapping("Trippin", "TripPin.Client");

    let source = generate_source(&model, &config)?;
    println!("// ---- generated proxy source ----");
    println!("{source}");

    let edmx = generate_edmx(&model, true)?;
    println!("// ---- canonical markup ----");
    println!("{edmx}");

    Ok(())
}

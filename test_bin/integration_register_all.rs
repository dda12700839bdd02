use std::sync::Arc;

use xlate_core::container::ServiceContainer;
use xlate_core::engine::session::Session;
use xlate_core::expr::datatype::ValueTypeId;
use xlate_core::expr::{column, method};
use xlate_error::{Result, XlateError};
use xlate_ext_default::DefaultSessionBuilderExt;

fn main() -> Result<()> {
    logutil::configure_global_logger(
        tracing::Level::INFO,
        logutil::LogFormat::HumanReadable,
        std::io::stderr,
    );

    let mut container = ServiceContainer::new();
    xlate_ext_default::register_all(&mut container);

    let session = Session::builder()
        .use_all()
        .with_service_container(Arc::new(container))
        .build()?;

    let covers = method(
        ValueTypeId::Geometry,
        column("shape", ValueTypeId::Geometry),
        "Covers",
        [column("other", ValueTypeId::Geometry).into()],
    );
    let compiled = session.compile(covers.into())?;
    if compiled.sql != "ST_Covers(shape, other)" {
        return Err(XlateError::new("Unexpected translation").with_field("sql", compiled.sql));
    }

    Ok(())
}

use std::cell::RefCell;
use std::rc::Rc;

use plotscale::core::{Domain, OutputRange, Samples, ViewExtent, ViewKey};
use plotscale::{LinearScaleConfig, LinearScaleModel};

#[test]
fn scale_model_smoke_flow() {
    let _ = plotscale::telemetry::init_default_tracing();

    let mut model = LinearScaleModel::new(LinearScaleConfig::new()).expect("model init");
    let domains = Rc::new(RefCell::new(Vec::<Domain>::new()));
    let sink = domains.clone();
    model.on_domain_changed(move |domain| sink.borrow_mut().push(*domain));

    model
        .compute_and_set_extent_from_samples("line", &Samples::Flat(vec![10.0, 30.0, 20.0]))
        .expect("line samples");
    model
        .compute_and_set_extent_from_samples(
            "scatter",
            &Samples::Nested(vec![vec![15.0, 25.0], vec![5.0]]),
        )
        .expect("scatter samples");
    model
        .set_view_extent("legend", ViewExtent::Empty)
        .expect("legend");

    assert_eq!(model.domain(), Domain::Span(5.0, 30.0));
    assert!(!model.is_empty());

    let scale = model.scale(OutputRange::horizontal(500)).expect("scale");
    let px = scale.map(17.5).expect("to pixel");
    assert!((px - 250.0).abs() <= 1e-9);
    let back = scale.invert(px).expect("from pixel");
    assert!((back - 17.5).abs() <= 1e-9);

    model.set_reverse(true).expect("reverse");
    let reversed = model.scale(OutputRange::horizontal(500)).expect("reversed scale");
    assert!((reversed.map(30.0).expect("high") - 0.0).abs() <= 1e-9);

    assert!(model.remove_view(&ViewKey::from("scatter")));
    assert_eq!(model.domain(), Domain::Span(30.0, 10.0));

    assert_eq!(
        *domains.borrow(),
        vec![
            Domain::Span(10.0, 30.0),
            Domain::Span(5.0, 30.0),
            Domain::Span(30.0, 5.0),
            Domain::Span(30.0, 10.0),
        ]
    );
}

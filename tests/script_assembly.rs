//! End-to-end script assembly: full artifacts for representative missions.

use gmatkit::mission::{
    Achieve, Comparison, Condition, ExitMode, ForLoop, IfBlock, Maneuver, Propagate, Report, Step,
    StopCondition, TargetBlock, Vary, propagate_to_apoapsis, propagate_to_periapsis,
};
use gmatkit::resources::{
    BurnFrame, CelestialBody, DifferentialCorrector, ForceModel, GravityField, ImpulsiveBurn,
    KeplerianState, LocalAxes, Propagator, ReportSink, Spacecraft, State, Variable,
};
use gmatkit::script::{SEQUENCE_SENTINEL, Script};

#[test]
fn counted_loop_with_guard_renders_exact_artifact() {
    // A loop over I from 1 to 20 whose body halts once I exceeds 15 and
    // reports I otherwise: executed by the engine, this yields exactly 15
    // reported rows (I = 1..15). The crate's contract is the script text.
    let variable = Variable::new("I");
    let sink = ReportSink::new("Rpt", "/tmp/loop.txt");

    let guard = IfBlock::new(Condition::new("I", Comparison::GreaterThan, 15.0))
        .with_body(vec![Step::Stop]);
    let body = ForLoop::new(&variable, 1, 1, 20).with_body(vec![
        guard.into(),
        Report::new(&sink, vec!["I".into()]).into(),
    ]);

    let script = Script::from_parts(
        vec![sink.clone().into(), variable.into()],
        vec![body.into()],
    )
    .unwrap();

    let expected = format!(
        "Create Variable I;\n\n{sink_block}\n\n{sentinel}\n\n\
         For I = 1:1:20;\n\
         If I > 15\n\
         Stop;\n\
         EndIf;\n\
         Report Rpt I;\n\
         EndFor;",
        sink_block = sink.script(),
        sentinel = SEQUENCE_SENTINEL,
    );
    assert_eq!(script.serialize(), expected);
}

#[test]
fn registry_orders_scrambled_resources_before_sentinel() {
    let luna = CelestialBody::luna();
    let model = ForceModel::new("FM", GravityField::moon(20, 20), &luna);
    let prop = Propagator::new("Prop", &model);
    let sat = Spacecraft::new(
        "Sat1",
        State::Keplerian(KeplerianState::new(2000.0, 0.0, 45.0, 0.0, 0.0, 0.0)),
    );
    let sink = ReportSink::new("Rpt", "/tmp/out.txt");

    // Deliberately scrambled declaration order.
    let script = Script::from_parts(
        vec![
            sink.into(),
            prop.clone().into(),
            sat.clone().into(),
            model.into(),
            Variable::new("I").into(),
        ],
        vec![
            Propagate::new(&prop, &[&sat], vec![StopCondition::at(sat.elapsed_secs(), 60.0)])
                .unwrap()
                .into(),
        ],
    )
    .unwrap();

    let text = script.serialize();
    let position = |needle: &str| text.find(needle).unwrap();
    assert!(position("Create Variable I;") < position("Create Spacecraft Sat1;"));
    assert!(position("Create Spacecraft Sat1;") < position("Create ForceModel FM;"));
    assert!(position("Create ForceModel FM;") < position("Create Propagator Prop;"));
    assert!(position("Create Propagator Prop;") < position("Create ReportFile Rpt;"));
    assert!(position("Create ReportFile Rpt;") < position(SEQUENCE_SENTINEL));
    assert!(position(SEQUENCE_SENTINEL) < position("Propagate Prop(Sat1)"));
}

#[test]
fn station_keeping_mission_assembles_target_blocks() {
    let luna = CelestialBody::luna();
    let altitude = 50.0;
    let deadband = 10.0;

    let sat = Spacecraft::new(
        "Sat1",
        State::Keplerian(KeplerianState::new(
            luna.radius_of_altitude(altitude),
            0.0,
            45.0,
            90.0,
            135.0,
            180.0,
        )),
    );
    let model = ForceModel::new("LunaForceModel", GravityField::moon(20, 20), &luna)
        .with_point_masses(&[CelestialBody::earth()]);
    let prop = Propagator::new("DefaultProp", &model);
    let dc = DifferentialCorrector::new("DC");
    let peri_burn = ImpulsiveBurn::new("PeriapsisBurn", BurnFrame::local(&luna, LocalAxes::Vnb));
    let apo_burn = ImpulsiveBurn::new("ApoapsisBurn", BurnFrame::local(&luna, LocalAxes::Vnb));
    let sink = ReportSink::new("Rpt", "/tmp/sk.txt");
    let report = Report::new(&sink, vec![sat.elapsed_days()]);

    let mut raise = TargetBlock::new(&dc).with_exit_mode(ExitMode::SaveAndContinue);
    raise.push(Vary::new(&dc, peri_burn.element1()));
    raise.push(Maneuver::new(&peri_burn, &sat));
    raise.push(Achieve::new(
        &dc,
        sat.relative_to(&luna).apoapsis_radius(),
        luna.radius_of_altitude(altitude),
    ));

    let mut circularize = TargetBlock::new(&dc).with_exit_mode(ExitMode::SaveAndContinue);
    circularize.push(Vary::new(&dc, apo_burn.element1()));
    circularize.push(Maneuver::new(&apo_burn, &sat));
    circularize.push(Achieve::new(
        &dc,
        sat.relative_to(&luna).sma(),
        luna.radius_of_altitude(altitude),
    ));

    let script = Script::from_parts(
        vec![
            sat.clone().into(),
            model.into(),
            prop.clone().into(),
            dc.clone().into(),
            peri_burn.into(),
            apo_burn.into(),
            sink.into(),
        ],
        vec![
            Propagate::new(
                &prop,
                &[&sat],
                vec![StopCondition::at(
                    sat.relative_to(&luna).rmag(),
                    luna.radius_of_altitude(altitude - deadband),
                )],
            )
            .unwrap()
            .described("Propagate Until Deadband Violation")
            .into(),
            propagate_to_periapsis(&sat, &prop, &luna).unwrap().into(),
            raise.into(),
            propagate_to_apoapsis(&sat, &prop, &luna).unwrap().into(),
            circularize.into(),
            report.into(),
        ],
    )
    .unwrap();

    let text = script.serialize();
    assert!(text.contains(
        "Propagate 'Propagate Until Deadband Violation' DefaultProp(Sat1) {Sat1.Luna.RMAG = 1777.5}"
    ));
    assert!(text.contains("Propagate 'Propagate to Periapsis' DefaultProp(Sat1) {Sat1.Luna.Periapsis}"));
    assert!(text.contains(
        "Target DC {SolveMode = Solve, ExitMode = SaveAndContinue, ShowProgressWindow = false};"
    ));
    assert!(text.contains(
        "Vary DC(PeriapsisBurn.Element1 = 0.5, {Perturbation = 0.0001, Lower = -100, \
         Upper = 100, AdditiveScaleFactor = 0, MultiplicativeScaleFactor = 1});"
    ));
    assert!(text.contains("Maneuver PeriapsisBurn(Sat1)"));
    assert!(text.contains("Achieve DC(Sat1.Luna.RadApo = 1787.5, {Tolerance = 0.1});"));
    assert!(text.contains("Achieve DC(Sat1.Luna.SMA = 1787.5, {Tolerance = 0.1});"));
    assert_eq!(text.matches("EndTarget;").count(), 2);
    // Burns are actuators: declared after the spacecraft, before the models.
    let position = |needle: &str| text.find(needle).unwrap();
    assert!(position("Create Spacecraft Sat1;") < position("Create ImpulsiveBurn PeriapsisBurn;"));
    assert!(position("Create ImpulsiveBurn ApoapsisBurn;") < position("Create ForceModel"));
}

#[test]
fn script_survives_job_descriptor_round_trip() {
    let variable = Variable::new("I");
    let sink = ReportSink::new("Rpt", "/tmp/out.txt");
    let body = ForLoop::new(&variable, 1, 1, 10)
        .with_body(vec![Report::new(&sink, vec!["I".into()]).into()]);
    let script =
        Script::from_parts(vec![variable.into(), sink.into()], vec![body.into()]).unwrap();

    let descriptor = serde_json::to_string(&script).unwrap();
    let restored: Script = serde_json::from_str(&descriptor).unwrap();
    assert_eq!(restored, script);
    assert_eq!(restored.serialize(), script.serialize());
}

//! Typed accessors with fallback values.

mod common;

use common::env_of;
use envfile_rs::{BoolVar, FloatVar, IntVar, StringVar};

#[test]
fn string_get() {
    let env = env_of(&["VALID=valid", "EMPTY="]);
    assert_eq!(StringVar::new("VALID").get_or(&env, "fallback".into()), "valid");
    assert_eq!(StringVar::new("EMPTY").get_or(&env, "fallback".into()), "fallback");
    assert_eq!(StringVar::new("UNSET").get_or(&env, "fallback".into()), "fallback");
    assert_eq!(StringVar::new("EMPTY").get(&env), "");
    assert_eq!(StringVar::new("UNSET").get(&env), "");
}

#[test]
fn string_lookup() {
    let env = env_of(&["VALID=valid", "EMPTY="]);
    assert_eq!(StringVar::new("VALID").lookup_or(&env, "fallback".into()), "valid");
    assert_eq!(StringVar::new("EMPTY").lookup_or(&env, "fallback".into()), "");
    assert_eq!(StringVar::new("UNSET").lookup_or(&env, "fallback".into()), "fallback");
    assert_eq!(StringVar::new("UNSET").lookup(&env), "");
}

#[test]
fn int_get() {
    let env = env_of(&[
        "VALID=100",
        "EMPTY=",
        "NOT_INT=is a string",
        "HEX=0xF",
        "BIN=0b10000000",
        "OCT=0o777",
    ]);
    assert_eq!(IntVar::new("VALID").get_or(&env, 200), 100);
    assert_eq!(IntVar::new("EMPTY").get_or(&env, 200), 200);
    assert_eq!(IntVar::new("UNSET").get_or(&env, 200), 200);
    assert_eq!(IntVar::new("NOT_INT").get_or(&env, 123), 123);
    assert_eq!(IntVar::new("NOT_INT").get(&env), 0);
    assert_eq!(IntVar::new("EMPTY").get(&env), 0);
    assert_eq!(IntVar::new("HEX").get_or(&env, 123), 15);
    assert_eq!(IntVar::new("BIN").get_or(&env, 123), 128);
    assert_eq!(IntVar::new("OCT").get(&env), 511);
}

#[test]
fn int_lookup() {
    let env = env_of(&["VALID=100", "EMPTY=", "NOT_INT=invalid"]);
    assert_eq!(IntVar::new("VALID").lookup_or(&env, 200), 100);
    assert_eq!(IntVar::new("EMPTY").lookup_or(&env, 200), 0);
    assert_eq!(IntVar::new("NOT_INT").lookup_or(&env, 200), 0);
    assert_eq!(IntVar::new("UNSET").lookup_or(&env, 200), 200);
    assert_eq!(IntVar::new("UNSET").lookup(&env), 0);
}

#[test]
fn float_accessors() {
    let env = env_of(&["VALID=1.5", "EMPTY=", "NOT_FLOAT=abc", "EXP=1e3"]);
    assert!((FloatVar::new("VALID").get_or(&env, 2.5) - 1.5).abs() < f64::EPSILON);
    assert!((FloatVar::new("EMPTY").get_or(&env, 2.5) - 2.5).abs() < f64::EPSILON);
    assert!((FloatVar::new("NOT_FLOAT").get_or(&env, 2.5) - 2.5).abs() < f64::EPSILON);
    assert!((FloatVar::new("EXP").get(&env) - 1000.0).abs() < f64::EPSILON);
    assert!(FloatVar::new("NOT_FLOAT").lookup_or(&env, 2.5).abs() < f64::EPSILON);
    assert!((FloatVar::new("UNSET").lookup_or(&env, 2.5) - 2.5).abs() < f64::EPSILON);
}

#[test]
fn bool_accessors() {
    let env = env_of(&["ON=true", "ONE=1", "OFF=F", "EMPTY=", "WORD=yes"]);
    assert!(BoolVar::new("ON").get(&env));
    assert!(BoolVar::new("ONE").get_or(&env, false));
    assert!(!BoolVar::new("OFF").get_or(&env, true));
    assert!(BoolVar::new("EMPTY").get_or(&env, true));
    assert!(BoolVar::new("WORD").get_or(&env, true));
    assert!(!BoolVar::new("WORD").lookup_or(&env, true));
    assert!(BoolVar::new("UNSET").lookup_or(&env, true));
    assert!(!BoolVar::new("UNSET").get(&env));
}

#[test]
fn accessors_read_loaded_files() {
    let mut env = env_of(&[]);
    envfile_rs::apply(
        &envfile_rs::parse("PORT=8080\nDEBUG=1\nRATIO=0.25\n"),
        &mut env,
        false,
    );
    assert_eq!(IntVar::new("PORT").get(&env), 8080);
    assert!(BoolVar::new("DEBUG").get(&env));
    assert!((FloatVar::new("RATIO").get(&env) - 0.25).abs() < f64::EPSILON);
    assert_eq!(StringVar::new("PORT").name(), "PORT");
}

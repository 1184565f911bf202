//! The runtime/lex/parse error kinds, end to end.

use test_utils::assert_fails;

#[test]
fn dividing_by_zero_is_a_runtime_error() {
    let err = assert_fails("print(1 / 0)\n");
    assert_eq!(err.line(), 1);
}

#[test]
fn calling_a_function_with_the_wrong_number_of_arguments_is_an_error() {
    let src = "def f(a, b):\n    return a + b\nf(1)\n";
    assert_fails(src);
}

#[test]
fn calling_a_non_callable_value_is_an_error() {
    assert_fails("x = 5\nx()\n");
}

#[test]
fn subscripting_a_non_subscriptable_value_is_an_error() {
    assert_fails("x = 5\nprint(x[0])\n");
}

#[test]
fn comparing_a_string_to_an_integer_is_an_error() {
    assert_fails("print('a' < 1)\n");
}

#[test]
fn looking_up_an_undefined_name_is_an_error() {
    let err = assert_fails("print(undefined_name)\n");
    assert_eq!(err.line(), 1);
}

#[test]
fn an_unterminated_string_literal_is_a_lex_error() {
    assert_fails("x = 'unterminated\n");
}

#[test]
fn a_dedent_to_an_unseen_indentation_level_is_a_lex_error() {
    let src = "if a:\n    if b:\n        pass\n  pass\n";
    assert_fails(src);
}

#[test]
fn an_else_with_no_preceding_if_is_a_parse_error() {
    assert_fails("else:\n    pass\n");
}

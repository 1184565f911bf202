//! `if`/`elif`/`else`, `for` over all three iterable kinds, and
//! `break`/`continue` propagation.

use test_utils::{assert_fails, assert_prints};

#[test]
fn elif_chain_picks_the_first_matching_branch() {
    let src = concat!(
        "def classify(n):\n",
        "    if n < 0:\n",
        "        return 'negative'\n",
        "    elif n == 0:\n",
        "        return 'zero'\n",
        "    else:\n",
        "        return 'positive'\n",
        "print(classify(-1))\n",
        "print(classify(0))\n",
        "print(classify(1))\n",
    );
    assert_prints(src, "negative\nzero\npositive\n");
}

#[test]
fn for_over_a_string_yields_one_character_strings() {
    let src = "for c in 'ab':\n    print(c)\n";
    assert_prints(src, "a\nb\n");
}

#[test]
fn for_over_a_dict_yields_keys_in_insertion_order() {
    let src = "d = {'b': 1, 'a': 2}\nfor k in d:\n    print(k)\n";
    assert_prints(src, "b\na\n");
}

#[test]
fn break_stops_the_nearest_enclosing_loop() {
    let src = "for i in [1,2,3,4]:\n    if i == 3:\n        break\n    print(i)\n";
    assert_prints(src, "1\n2\n");
}

#[test]
fn continue_skips_to_the_next_iteration() {
    let src = "for i in [1,2,3,4]:\n    if i == 2:\n        continue\n    print(i)\n";
    assert_prints(src, "1\n3\n4\n");
}

#[test]
fn break_outside_any_loop_is_promoted_to_a_runtime_error() {
    let err = assert_fails("break\n");
    assert_eq!(err.line(), 1);
}

#[test]
fn continue_inside_a_function_but_outside_a_loop_is_an_error() {
    let src = "def f():\n    continue\nf()\n";
    assert_fails(src);
}

#[test]
fn return_outside_any_function_is_an_error() {
    let err = assert_fails("return 1\n");
    assert_eq!(err.line(), 1);
}

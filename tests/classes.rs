//! User-defined classes: method dispatch, single inheritance, and the
//! invariant that instance attribute writes never propagate to the class
//! mapping.

use test_utils::{assert_fails, assert_prints};

#[test]
fn inherited_method_is_resolved_through_the_single_base_chain() {
    let src = concat!(
        "class Animal:\n",
        "    def speak(self):\n",
        "        return 'generic noise'\n",
        "class Dog(Animal):\n",
        "    def bark(self):\n",
        "        return self.speak() + '!'\n",
        "d = Dog()\n",
        "print(d.bark())\n",
    );
    assert_prints(src, "generic noise!\n");
}

#[test]
fn overriding_a_method_in_the_subclass_wins_over_the_base() {
    let src = concat!(
        "class Animal:\n",
        "    def speak(self):\n",
        "        return 'generic'\n",
        "class Dog(Animal):\n",
        "    def speak(self):\n",
        "        return 'woof'\n",
        "print(Dog().speak())\n",
    );
    assert_prints(src, "woof\n");
}

#[test]
fn instances_of_the_same_class_do_not_share_attribute_state() {
    let src = concat!(
        "class Counter:\n",
        "    def __init__(self):\n",
        "        self.n = 0\n",
        "    def tick(self):\n",
        "        self.n = self.n + 1\n",
        "a = Counter()\n",
        "b = Counter()\n",
        "a.tick()\n",
        "a.tick()\n",
        "b.tick()\n",
        "print(a.n)\n",
        "print(b.n)\n",
    );
    assert_prints(src, "2\n1\n");
}

#[test]
fn aliased_instance_mutation_is_visible_through_every_binding() {
    let src = concat!(
        "class Counter:\n",
        "    def __init__(self):\n",
        "        self.n = 0\n",
        "    def tick(self):\n",
        "        self.n = self.n + 1\n",
        "a = Counter()\n",
        "b = a\n",
        "b.tick()\n",
        "print(a.n)\n",
    );
    assert_prints(src, "1\n");
}

#[test]
fn missing_attribute_is_a_runtime_error() {
    let src = "class Empty:\n    pass\ne = Empty()\nprint(e.nope)\n";
    let err = assert_fails(src);
    assert_eq!(err.line(), 4);
}

#[test]
fn class_without_init_constructs_a_bare_instance() {
    assert_prints("class Thing:\n    pass\nt = Thing()\nprint(t)\n", "<Thing instance>\n");
}
